use crate::{
    core::{geo::Point, view::Direction},
    input::events::{InputEvent, KeyCode},
};

/// A view change requested by input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Move(Direction),
    ZoomIn,
    ZoomOut,
    Resize { width: f64, height: f64 },
}

/// Which third of an axis a point falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Start,
    Middle,
    End,
}

impl Band {
    fn of(value: f64, extent: f64) -> Self {
        if value < extent / 3.0 {
            Band::Start
        } else if value > extent * 2.0 / 3.0 {
            Band::End
        } else {
            Band::Middle
        }
    }
}

/// Cell of the 3×3 click partition under a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverZone {
    pub horizontal: Band,
    pub vertical: Band,
}

impl HoverZone {
    pub fn at(position: Point, surface: (f64, f64)) -> Self {
        Self {
            horizontal: Band::of(position.x, surface.0),
            vertical: Band::of(position.y, surface.1),
        }
    }

    /// Whether a click here would move the view
    pub fn is_clickable(&self) -> bool {
        self.horizontal != Band::Middle || self.vertical != Band::Middle
    }

    /// Steps a click in this zone triggers, horizontal first
    pub fn directions(&self) -> Vec<Direction> {
        let mut out = Vec::with_capacity(2);
        match self.horizontal {
            Band::Start => out.push(Direction::Left),
            Band::End => out.push(Direction::Right),
            Band::Middle => {}
        }
        match self.vertical {
            Band::Start => out.push(Direction::Up),
            Band::End => out.push(Direction::Down),
            Band::Middle => {}
        }
        out
    }
}

/// Turns raw input events into view actions
#[derive(Debug, Default)]
pub struct InputHandler {
    hover: Option<HoverZone>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zone under the pointer after the last mouse move
    pub fn hover(&self) -> Option<HoverZone> {
        self.hover
    }

    /// Handle an input event and return the resulting actions.
    ///
    /// Mouse moves only update the hover zone and never produce actions.
    pub fn handle_event(&mut self, event: &InputEvent, surface: (f64, f64)) -> Vec<Action> {
        match event {
            InputEvent::KeyPress { key } => match key {
                KeyCode::ArrowLeft => vec![Action::Move(Direction::Left)],
                KeyCode::ArrowRight => vec![Action::Move(Direction::Right)],
                KeyCode::ArrowUp => vec![Action::Move(Direction::Up)],
                KeyCode::ArrowDown => vec![Action::Move(Direction::Down)],
                KeyCode::Plus => vec![Action::ZoomIn],
                KeyCode::Minus => vec![Action::ZoomOut],
                KeyCode::Other => Vec::new(),
            },
            InputEvent::Click { position } => HoverZone::at(*position, surface)
                .directions()
                .into_iter()
                .map(Action::Move)
                .collect(),
            InputEvent::MouseMove { position } => {
                self.hover = Some(HoverZone::at(*position, surface));
                Vec::new()
            }
            InputEvent::Resize { width, height } => vec![Action::Resize {
                width: *width,
                height: *height,
            }],
        }
    }
}

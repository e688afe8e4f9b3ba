mod common;

use common::{ready_map, recorder};
use tileview::prelude::*;

fn press(map: &mut Map, key: KeyCode) -> bool {
    map.handle_input(InputEvent::KeyPress { key }).unwrap()
}

fn click(map: &mut Map, x: f64, y: f64) -> bool {
    map.handle_input(InputEvent::Click {
        position: Point::new(x, y),
    })
    .unwrap()
}

#[tokio::test]
async fn test_move_right_at_last_column_is_clamped() {
    let mut map = ready_map((4.0, 0.0)).await;
    assert!(press(&mut map, KeyCode::ArrowRight));
    assert_eq!(map.center(), GridCoord::new(4.0, 0.0));
}

#[tokio::test]
async fn test_walk_across_the_grid_and_back() {
    let mut map = ready_map((0.0, 0.0)).await;
    for _ in 0..10 {
        press(&mut map, KeyCode::ArrowRight);
        press(&mut map, KeyCode::ArrowDown);
    }
    assert_eq!(map.center(), GridCoord::new(4.0, 4.0));

    for _ in 0..10 {
        press(&mut map, KeyCode::ArrowLeft);
        press(&mut map, KeyCode::ArrowUp);
    }
    assert_eq!(map.center(), GridCoord::new(0.0, 0.0));
}

#[tokio::test]
async fn test_fractional_center_snaps_on_move() {
    let mut map = ready_map((0.0, 0.0)).await;
    map.set_center(1.7, 2.4);
    press(&mut map, KeyCode::ArrowRight);
    assert_eq!(map.center(), GridCoord::new(2.0, 2.4));
    press(&mut map, KeyCode::ArrowUp);
    assert_eq!(map.center(), GridCoord::new(2.0, 1.0));
}

#[tokio::test]
async fn test_moving_back_in_from_outside_the_grid() {
    let mut map = ready_map((0.0, 0.0)).await;
    map.set_center(10.0, 10.0);
    press(&mut map, KeyCode::ArrowLeft);
    assert_eq!(map.center(), GridCoord::new(4.0, 10.0));
}

#[tokio::test]
async fn test_zoom_is_clamped() {
    let mut map = ready_map((0.0, 0.0)).await;
    for _ in 0..20 {
        press(&mut map, KeyCode::Plus);
    }
    assert_eq!(map.view().zoom(), 5.0);
    for _ in 0..20 {
        press(&mut map, KeyCode::Minus);
    }
    assert_eq!(map.view().zoom(), 0.5);
    assert_eq!(map.view().resolution(), 2f64.powf(-0.5));
}

#[tokio::test]
async fn test_edge_clicks_step_toward_the_edge() {
    let mut map = ready_map((2.0, 2.0)).await;

    assert!(click(&mut map, 10.0, 300.0));
    assert_eq!(map.center(), GridCoord::new(1.0, 2.0));

    assert!(click(&mut map, 400.0, 10.0));
    assert_eq!(map.center(), GridCoord::new(1.0, 1.0));

    assert!(click(&mut map, 10.0, 590.0));
    assert_eq!(map.center(), GridCoord::new(0.0, 2.0));
}

#[tokio::test]
async fn test_click_on_third_boundaries_counts_as_middle() {
    let mut map = ready_map((2.0, 2.0)).await;
    assert!(!click(&mut map, 800.0 / 3.0, 200.0));
    assert!(!click(&mut map, 1600.0 / 3.0, 400.0));
    assert_eq!(map.center(), GridCoord::new(2.0, 2.0));
    assert_eq!(recorder(&map).frame_count, 1);
}

#[tokio::test]
async fn test_hover_tracks_clickable_zones() {
    let mut map = ready_map((2.0, 2.0)).await;
    assert!(!map
        .handle_input(InputEvent::MouseMove {
            position: Point::new(790.0, 300.0),
        })
        .unwrap());
    assert!(map.hover().unwrap().is_clickable());

    map.handle_input(InputEvent::MouseMove {
        position: Point::new(400.0, 300.0),
    })
    .unwrap();
    assert!(!map.hover().unwrap().is_clickable());
    assert_eq!(map.center(), GridCoord::new(2.0, 2.0));
}

#[tokio::test]
async fn test_input_ignored_until_initialized() {
    let mut map = common::world_map((0.0, 0.0));
    assert!(!press(&mut map, KeyCode::ArrowRight));
    assert!(!click(&mut map, 790.0, 590.0));
    assert_eq!(map.center(), GridCoord::new(0.0, 0.0));
    assert_eq!(recorder(&map).frame_count, 0);
}

#[tokio::test]
async fn test_moves_ignored_without_layers() {
    let mut map = MapBuilder::new()
        .loader(common::StubLoader)
        .surface(RenderContext::new(800.0, 600.0))
        .build()
        .unwrap();
    map.initialize().await.unwrap();

    press(&mut map, KeyCode::ArrowRight);
    assert_eq!(map.center(), GridCoord::new(0.0, 0.0));
}

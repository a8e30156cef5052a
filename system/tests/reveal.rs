use system::euclid::default::Point2D;
use system::{
    AudienceMessage, Color, CompositeMode, DiscoverableMap, Frame, ImageStore, MapDiscoverer,
    Marker, MarkerIcon, Raster, Tool,
};

fn store_with(url: &str, width: u32, height: u32) -> ImageStore {
    let mut images = ImageStore::new();
    images.insert(url, Raster::filled(width, height, Color { r: 120, g: 90, b: 60 }));
    images
}

fn reveal_rect(map: &mut DiscoverableMap, x0: f32, y0: f32, x1: f32, y1: f32) {
    map.veil_mut().fill_rect(
        Point2D::new(x0, y0),
        Point2D::new(x1, y1),
        Color::BLACK,
        CompositeMode::DestinationOut,
    );
}

#[test]
fn undo_redo_restores_checkpoints_byte_for_byte() {
    let images = store_with("/maps/keep.png", 64, 64);
    let mut map = DiscoverableMap::new("/maps/keep.png");
    map.init(&images, |_, _| {}).unwrap();

    let mut states = vec![map.veil().clone()];
    for i in 0..4 {
        let offset = (i * 12) as f32;
        reveal_rect(&mut map, offset, 0.0, offset + 8.0, 8.0);
        map.save_checkpoint();
        states.push(map.veil().clone());
    }

    for expected in states.iter().rev().skip(1) {
        map.undo();
        assert_eq!(map.veil(), expected);
    }
    for expected in states.iter().skip(1) {
        map.redo();
        assert_eq!(map.veil(), expected);
    }
}

#[test]
fn new_checkpoint_after_undo_invalidates_redo() {
    let images = store_with("/maps/keep.png", 32, 32);
    let mut map = DiscoverableMap::new("/maps/keep.png");
    map.init(&images, |_, _| {}).unwrap();

    reveal_rect(&mut map, 0.0, 0.0, 8.0, 8.0);
    map.save_checkpoint();
    reveal_rect(&mut map, 16.0, 16.0, 24.0, 24.0);
    map.save_checkpoint();

    map.undo();
    reveal_rect(&mut map, 8.0, 8.0, 12.0, 12.0);
    map.save_checkpoint();
    let after_branch = map.veil().clone();

    // The discarded branch is unreachable.
    map.redo();
    assert_eq!(*map.veil(), after_branch);
}

#[test]
fn undo_at_the_bottom_and_redo_at_the_top_are_no_ops() {
    let images = store_with("/maps/keep.png", 16, 16);
    let mut map = DiscoverableMap::new("/maps/keep.png");
    map.init(&images, |_, _| {}).unwrap();

    let initial = map.veil().clone();
    map.undo();
    assert_eq!(*map.veil(), initial);
    map.redo();
    assert_eq!(*map.veil(), initial);
}

#[test]
fn markers_survive_the_fog_but_plain_pixels_do_not() {
    let mut images = store_with("/maps/cave.png", 100, 100);
    images.insert("/img/marker.png", Raster::filled(6, 6, Color { r: 0, g: 200, b: 0 }));

    let mut map = DiscoverableMap::new("/maps/cave.png");
    map.init(&images, |_, _| {}).unwrap();

    // Reveal two far corners so the bounding box spans covered ground.
    reveal_rect(&mut map, 0.0, 0.0, 4.0, 4.0);
    reveal_rect(&mut map, 96.0, 96.0, 100.0, 100.0);
    map.markers_mut().push(
        Marker {
            url: "/img/marker.png".into(),
            x: 50,
            y: 50,
        },
        &images,
    );

    let area = map.calculate_discovered_map_area().unwrap();
    assert_eq!(area.bounds.width(), 100);
    assert_eq!(area.bounds.height(), 100);

    // Marker pixels keep their color inside a still-covered region.
    assert_eq!(area.image.pixel(52, 52), [0, 200, 0, 255]);
    // A covered pixel without a marker is blacked out, alpha preserved.
    let covered = area.image.pixel(30, 30);
    assert_eq!(&covered[0..3], &[0, 0, 0]);
    assert_eq!(covered[3], 255);
    // A revealed pixel shows the map.
    assert_eq!(area.image.pixel(1, 1), [120, 90, 60, 255]);
}

#[test]
fn pencil_stroke_scenario_produces_the_expected_area() {
    let images = store_with("/maps/plain.png", 100, 100);
    let mut stage = MapDiscoverer::new(images);
    stage.load_map("/maps/plain.png").unwrap();
    stage.set_pen_size(20.0);

    stage.pointer_down(Point2D::new(10.0, 10.0));
    stage.pointer_move(Point2D::new(30.0, 10.0));
    stage.pointer_move(Point2D::new(50.0, 10.0));
    stage.pointer_up(Point2D::new(50.0, 10.0));

    let area = stage
        .current_map()
        .unwrap()
        .calculate_discovered_map_area()
        .unwrap();

    assert_eq!(area.bounds.min_x, 0);
    assert_eq!(area.bounds.min_y, 0);
    assert!(area.bounds.max_x >= 57 && area.bounds.max_x <= 60);
    assert!(area.bounds.max_y >= 17 && area.bounds.max_y <= 20);
    assert_eq!(area.image.width(), area.bounds.width());
    assert_eq!(area.image.height(), area.bounds.height());
}

#[test]
fn nothing_revealed_means_nothing_to_send() {
    let images = store_with("/maps/plain.png", 40, 40);
    let mut stage = MapDiscoverer::new(images);
    stage.load_map("/maps/plain.png").unwrap();

    assert!(stage.current_map().unwrap().calculate_discovered_map_area().is_none());
    assert!(stage.send_to_audience().is_none());
}

#[test]
fn send_to_audience_pairs_metadata_with_the_payload() {
    let images = store_with("/maps/plain.png", 80, 80);
    let mut stage = MapDiscoverer::new(images);
    stage.load_map("/maps/plain.png").unwrap();
    stage.pointer_down(Point2D::new(40.0, 40.0));
    stage.pointer_up(Point2D::new(40.0, 40.0));

    let frames = stage.send_to_audience().unwrap();
    assert_eq!(frames.len(), 2);

    let (width, height) = match &frames[0] {
        Frame::Text(json) => match system::serde_json::from_str::<AudienceMessage>(json).unwrap() {
            AudienceMessage::MapMetadata { width, height } => (width, height),
            other => panic!("unexpected message {:?}", other),
        },
        other => panic!("expected metadata first, got {:?}", other),
    };
    match &frames[1] {
        Frame::Binary(bytes) => assert_eq!(bytes.len(), (width * height * 4) as usize),
        other => panic!("expected binary payload second, got {:?}", other),
    }
}

#[test]
fn loading_a_map_twice_is_a_cache_hit_that_keeps_edits() {
    let images = store_with("/maps/plain.png", 60, 60);
    let mut stage = MapDiscoverer::new(images);
    stage.load_map("/maps/plain.png").unwrap();
    stage.pointer_down(Point2D::new(30.0, 30.0));
    stage.pointer_up(Point2D::new(30.0, 30.0));

    let area_before = stage
        .current_map()
        .unwrap()
        .calculate_discovered_map_area()
        .unwrap();

    let dimensions = stage.load_map("/maps/plain.png").unwrap();
    assert_eq!(dimensions, (60, 60));
    let area_after = stage
        .current_map()
        .unwrap()
        .calculate_discovered_map_area()
        .unwrap();
    assert_eq!(area_before, area_after);
}

#[test]
fn dragging_a_marker_moves_it_and_cancelling_restores_it() {
    let mut images = store_with("/maps/plain.png", 100, 100);
    images.insert("/img/skull.png", Raster::filled(8, 8, Color { r: 255, g: 255, b: 255 }));

    let mut stage = MapDiscoverer::new(images);
    stage.load_map("/maps/plain.png").unwrap();
    stage.configure_marker_tools(&[MarkerIcon {
        id: system::uuid::Uuid::new_v4(),
        title: "Skull".into(),
        url: "/img/skull.png".into(),
    }]);

    // The marker tool was appended after pencil and rectangle.
    assert!(stage.select_tool(2));
    stage.pointer_down(Point2D::new(20.0, 20.0));
    stage.pointer_up(Point2D::new(20.0, 20.0));
    assert_eq!(stage.current_map().unwrap().markers().markers()[0].x, 20);

    // Drag it somewhere else.
    stage.pointer_down(Point2D::new(22.0, 22.0));
    stage.pointer_move(Point2D::new(60.0, 60.0));
    stage.pointer_up(Point2D::new(60.0, 60.0));
    {
        let markers = stage.current_map().unwrap().markers().markers();
        assert_eq!(markers.len(), 1);
        assert_eq!((markers[0].x, markers[0].y), (60, 60));
    }

    // Start another drag but leave the canvas: the marker goes back.
    stage.pointer_down(Point2D::new(62.0, 62.0));
    stage.pointer_move(Point2D::new(90.0, 90.0));
    stage.pointer_out(Point2D::new(90.0, 90.0));
    {
        let markers = stage.current_map().unwrap().markers().markers();
        assert_eq!(markers.len(), 1);
        assert_eq!((markers[0].x, markers[0].y), (60, 60));
    }
}

#[test]
fn marker_palette_falls_back_to_a_generic_tool() {
    let images = store_with("/maps/plain.png", 10, 10);
    let mut stage = MapDiscoverer::new(images);
    stage.configure_marker_tools(&[]);
    let generic = stage
        .tools()
        .iter()
        .filter(|tool| matches!(tool, Tool::PlaceMarker(_)))
        .count();
    assert_eq!(generic, 1);
}

#[test]
fn cover_mode_paints_the_veil_back() {
    let images = store_with("/maps/plain.png", 50, 50);
    let mut stage = MapDiscoverer::new(images);
    stage.load_map("/maps/plain.png").unwrap();

    stage.pointer_down(Point2D::new(25.0, 25.0));
    stage.pointer_up(Point2D::new(25.0, 25.0));
    assert!(stage.current_map().unwrap().calculate_discovered_map_area().is_some());

    stage.toggle_cover();
    stage.pointer_down(Point2D::new(25.0, 25.0));
    stage.pointer_up(Point2D::new(25.0, 25.0));
    assert!(stage.current_map().unwrap().calculate_discovered_map_area().is_none());
}

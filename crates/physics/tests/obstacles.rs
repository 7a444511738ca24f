use physics::{CourseParams, ObstaclePair, Silhouettes};

#[test]
fn gap_heights_stay_in_range() {
    let course = CourseParams::default();
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..10_000 {
        let pair = ObstaclePair::spawn(700.0, &course, &mut rng);
        assert!((50.0..450.0).contains(&pair.gap_top), "gap_top={}", pair.gap_top);
        assert_eq!(pair.gap_top.fract(), 0.0);
        assert_eq!(pair.gap_bottom - pair.gap_top, 170.0);
    }
}

#[test]
fn pair_leaves_screen_on_first_tick_past_its_width() {
    let course = CourseParams::default();
    let width = Silhouettes::standard().pipe_width();
    let mut pair = ObstaclePair::with_gap(700.0, 250.0, course.gap);

    let mut ticks = 0;
    while !pair.is_off_screen(width) {
        pair.advance(course.scroll_speed);
        ticks += 1;
    }
    // 700 - 5n + 104 < 0 first holds at n = 161
    assert_eq!(ticks, 161);
    assert_eq!(pair.x, -105.0);
}

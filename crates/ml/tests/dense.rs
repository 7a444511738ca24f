use ml::{Dense, FeedForward, Observation, Policy, PolicyError};

#[test]
fn dense_forward_is_affine() {
    let layer = Dense::new(vec![1.0, 2.0, 3.0, 0.0, -1.0, 0.5], vec![0.5, -1.0], 3, 2);
    assert_eq!(layer.forward(&[1.0, 1.0, 1.0]), vec![6.5, -1.5]);
}

#[test]
fn random_layer_respects_glorot_limit() {
    let mut rng = fastrand::Rng::with_seed(11);
    let layer = Dense::random(3, 4, &mut rng);
    let limit = (6.0_f32 / 7.0).sqrt();
    assert_eq!(layer.w.len(), 12);
    assert!(layer.w.iter().all(|w| w.abs() <= limit));
}

#[test]
fn network_output_is_squashed() {
    let mut net = FeedForward::new(vec![Dense::new(vec![10.0, 0.0, 0.0], vec![0.0], 3, 1)]);
    let out = net.evaluate(&Observation::new(1000.0, 0.0, 0.0)).unwrap();
    assert_eq!(out.len(), 1);
    assert!((out[0] - 1.0).abs() < 1e-6);
}

#[test]
fn mismatched_input_width_is_a_policy_error() {
    let mut rng = fastrand::Rng::with_seed(1);
    let mut net = FeedForward::random(&[4, 1], &mut rng);
    let err = net.evaluate(&Observation::new(0.0, 0.0, 0.0)).unwrap_err();
    assert!(matches!(err, PolicyError::Failed(_)));
}

#[test]
fn network_round_trips_through_json() {
    let mut rng = fastrand::Rng::with_seed(5);
    let net = FeedForward::random(&[3, 2, 1], &mut rng);
    let json = serde_json::to_string(&net).unwrap();
    let back: FeedForward = serde_json::from_str(&json).unwrap();
    assert_eq!(net, back);
}

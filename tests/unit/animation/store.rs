use super::*;
use crate::animation::pose::Pose;

fn kf(id: &str, time: f64, path_progress: f64) -> Keyframe {
    Keyframe::new(
        id,
        time,
        Pose {
            path_progress,
            ..Pose::NEUTRAL
        },
    )
}

#[test]
fn new_store_has_one_neutral_key() {
    let store = KeyframeStore::new();
    assert_eq!(store.len(), 1);
    let k = &store.keyframes()[0];
    assert_eq!(k.time, 0.0);
    assert_eq!(k.pose, Pose::NEUTRAL);
    assert_eq!(k.id.as_str(), "kf-0");
}

#[test]
fn insert_seeds_from_interpolated_pose_and_keeps_order() {
    let mut store =
        KeyframeStore::from_keyframes(vec![kf("a", 0.0, 0.0), kf("b", 100.0, 1.0)]).unwrap();
    let id = store.insert_at(30.0).unwrap();
    let times: Vec<f64> = store.keyframes().iter().map(|k| k.time).collect();
    assert_eq!(times, vec![0.0, 30.0, 100.0]);
    let inserted = store.select_by_id(&id).unwrap();
    assert!((inserted.pose.path_progress - 0.3).abs() < 1e-12);
    assert_eq!(store.index_of(&id), Some(1));
}

#[test]
fn inserted_ids_are_unique() {
    let mut store = KeyframeStore::new();
    let a = store.insert_at(10.0).unwrap();
    let b = store.insert_at(10.0).unwrap();
    assert_ne!(a, b);
    assert!(!store.is_time_unique(10.0, None));
    assert!(store.is_time_unique(55.0, None));
}

#[test]
fn last_keyframe_cannot_be_deleted() {
    let mut store = KeyframeStore::new();
    let id = store.keyframes()[0].id.clone();
    let err = store.delete_by_id(&id).unwrap_err();
    assert!(matches!(err, FlightpathError::CannotDeleteLastKeyframe));
    assert_eq!(store.len(), 1);
}

#[test]
fn delete_removes_and_reports_unknown_ids() {
    let mut store = KeyframeStore::new();
    let id = store.insert_at(50.0).unwrap();
    let removed = store.delete_by_id(&id).unwrap();
    assert_eq!(removed.time, 50.0);
    assert_eq!(store.len(), 1);
    let err = store.delete_by_id(&KeyframeId::from("nope")).unwrap_err();
    assert!(matches!(err, FlightpathError::UnknownKeyframe(_)));
}

#[test]
fn update_with_time_resorts() {
    let mut store =
        KeyframeStore::from_keyframes(vec![kf("a", 0.0, 0.0), kf("b", 40.0, 0.5)]).unwrap();
    let a = KeyframeId::from("a");
    store
        .update(
            &a,
            &PoseUpdate {
                time: Some(80.0),
                rotation_z: Some(15.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.keyframes()[0].id.as_str(), "b");
    assert_eq!(store.keyframes()[1].pose.rotation_z, 15.0);
    assert!(store.is_time_unique(80.0, Some(&a)));
}

#[test]
fn nearest_prefers_earliest_on_tie() {
    let store = KeyframeStore::from_keyframes(vec![kf("a", 20.0, 0.0), kf("b", 40.0, 0.0)])
        .unwrap();
    assert_eq!(store.select_nearest(30.0).unwrap().id.as_str(), "a");
    assert_eq!(store.select_nearest(39.0).unwrap().id.as_str(), "b");
}

#[test]
fn replace_all_rejects_empty_and_keeps_state() {
    let mut store = KeyframeStore::new();
    store.insert_at(60.0).unwrap();
    let err = store.replace_all(Vec::new()).unwrap_err();
    assert!(matches!(err, FlightpathError::Validation(_)));
    assert_eq!(store.len(), 2);
}

#[test]
fn replace_all_repairs_blank_and_duplicate_ids() {
    let mut store = KeyframeStore::new();
    store
        .replace_all(vec![
            kf("", 90.0, 1.0),
            kf("kf-0", 10.0, 0.1),
            kf("kf-0", 20.0, 0.2),
        ])
        .unwrap();
    let ids: HashSet<&str> = store.keyframes().iter().map(|k| k.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(""));
    assert_eq!(store.keyframes()[0].id.as_str(), "kf-0");
    assert_eq!(store.keyframes()[2].time, 90.0);
}

#[test]
fn reads_do_not_mutate() {
    let store =
        KeyframeStore::from_keyframes(vec![kf("a", 0.0, 0.0), kf("b", 100.0, 1.0)]).unwrap();
    let before = store.keyframes().to_vec();
    let _ = store.pose_at(12.0);
    let _ = store.select_nearest(12.0);
    assert_eq!(store.keyframes(), before.as_slice());
}

#[test]
fn non_finite_values_never_enter_the_store() {
    let mut store = KeyframeStore::new();
    let err = store.insert_at(f64::NAN).unwrap_err();
    assert!(matches!(err, FlightpathError::Validation(_)));
    assert!(store.insert_at(f64::NEG_INFINITY).is_err());
    assert_eq!(store.len(), 1);

    let id = store.keyframes()[0].id.clone();
    let edit = PoseUpdate {
        rotation_z: Some(30.0),
        time: Some(f64::INFINITY),
        ..PoseUpdate::default()
    };
    let err = store.update(&id, &edit).unwrap_err();
    assert!(err.to_string().contains("time"));
    assert_eq!(store.keyframes()[0].time, 0.0);
    assert_eq!(store.keyframes()[0].pose.rotation_z, 0.0);

    let err = store
        .replace_all(vec![kf("a", 0.0, 0.0), kf("b", 50.0, f64::NAN)])
        .unwrap_err();
    assert!(err.to_string().contains("$[1].pathProgress"));
    assert_eq!(store.len(), 1);
}

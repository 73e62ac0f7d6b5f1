use crate::device_sensor::impl_fake::HandPose;
use crate::error::{BoxError, GestureError};
use crate::feature_vector::feature_set::FeatureSet;
use crate::feature_vector::main::FeatureVector;
use crate::gesture_classifier::main::GestureClassifier;
use crate::gesture_classifier::tests::fixture::Fixture;
use crate::library::logger::interface::{Level, Logger};
use std::sync::Arc;

#[test]
fn test_classify_without_model_fails() {
    let mut f = Fixture::new("no-model");
    f.classifier.start().unwrap();

    assert!(!f.classifier.model_exists());
    let result = f.classifier.classify(&f.sample(HandPose::Fist));
    assert!(matches!(result, Err(GestureError::ModelNotLoaded)));
    assert!(f.logger.contains("No trained model"));
}

#[test]
fn test_overfit_single_gesture() {
    let mut f = Fixture::new("overfit");
    let vectors = f.capture(HandPose::Fist, 12);

    f.classifier.train().unwrap();

    assert!(f.classifier.model_exists());
    assert!(f.classifier.training_finished());
    for vector in &vectors {
        assert_eq!(f.classifier.classify(&vector.to_array()).unwrap(), "fist");
    }
}

#[test]
fn test_distinguishes_trained_gestures() {
    for feature_set in [FeatureSet::Spatial, FeatureSet::Planar] {
        let mut f = Fixture::with_config(&format!("distinguish-{}", feature_set), |config| {
            config.feature_set = feature_set;
        });
        f.capture(HandPose::Open, 10);
        f.capture(HandPose::Fist, 10);
        f.capture(HandPose::Point, 10);

        f.classifier.train().unwrap();

        for pose in [HandPose::Open, HandPose::Fist, HandPose::Point] {
            assert_eq!(
                f.classifier.classify(&f.sample(pose)).unwrap(),
                pose.name(),
                "{} feature set",
                feature_set
            );
        }
    }
}

#[test]
fn test_wrong_dimension_is_rejected() {
    let mut f = Fixture::new("dimension");
    f.capture(HandPose::Open, 4);
    f.classifier.train().unwrap();

    let result = f.classifier.classify(&[0.5; 3]);

    assert!(matches!(
        result,
        Err(GestureError::DimensionMismatch {
            expected: 18,
            actual: 3
        })
    ));
}

#[test]
fn test_training_rejects_bad_batches() {
    let mut f = Fixture::new("bad-batches");

    assert!(matches!(f.classifier.train(), Err(GestureError::Training(_))));

    let labeled = f.capture(HandPose::Open, 2);
    let unlabeled = FeatureVector::from_array(FeatureSet::Spatial, &[1.0; 18]).unwrap();
    let result = f.classifier.train_on(&[labeled[0].clone(), unlabeled]);
    assert!(matches!(
        result,
        Err(GestureError::UnlabeledVector { index: 1 })
    ));

    let other_set = FeatureVector::from_array(FeatureSet::Planar, &[1.0; 14])
        .unwrap()
        .annotate("open", 0);
    let result = f.classifier.train_on(&[labeled[1].clone(), other_set]);
    assert!(matches!(result, Err(GestureError::Training(_))));

    assert!(!f.classifier.model_exists());
    assert!(!f.classifier.training_finished());
}

#[test]
fn test_saved_model_classifies_identically_after_restart() {
    let mut f = Fixture::new("round-trip");
    f.capture(HandPose::Open, 8);
    f.capture(HandPose::Victory, 8);
    f.capture(HandPose::Pinch, 8);
    f.classifier.train().unwrap();
    assert!(f.classifier.model_path().exists());

    let samples: Vec<Vec<f64>> = (0..6)
        .flat_map(|_| {
            [HandPose::Open, HandPose::Victory, HandPose::Pinch, HandPose::Fist]
                .map(|pose| f.sample(pose))
        })
        .collect();
    let before: Vec<String> = samples
        .iter()
        .map(|sample| f.classifier.classify(sample).unwrap())
        .collect();

    let mut restarted = f.restarted();
    restarted.start().unwrap();
    assert!(restarted.model_exists());
    let after: Vec<String> = samples
        .iter()
        .map(|sample| restarted.classify(sample).unwrap())
        .collect();

    assert_eq!(before, after);
}

#[test]
fn test_bundled_model_is_used_on_first_run() {
    let f = Fixture::new("bundled");
    f.capture(HandPose::Open, 4);
    f.capture(HandPose::Fist, 4);
    let mut trainer = f.restarted();
    trainer.train().unwrap();

    let bundled = f
        .config
        .storage
        .bundled_root
        .join("Model")
        .join(&f.config.classifier.model_name);
    std::fs::create_dir_all(bundled.parent().unwrap()).unwrap();
    std::fs::rename(trainer.model_path(), &bundled).unwrap();

    let mut fresh = f.restarted();
    fresh.start().unwrap();

    assert!(fresh.model_exists());
    assert!(fresh.model_path().exists());
    assert_eq!(fresh.classify(&f.sample(HandPose::Fist)).unwrap(), "fist");
}

#[test]
fn test_corrupt_model_degrades_to_no_model() {
    let mut f = Fixture::new("corrupt");
    let path = f
        .config
        .storage
        .writable_root
        .join("Model")
        .join(&f.config.classifier.model_name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    f.classifier.start().unwrap();

    assert!(!f.classifier.model_exists());
    assert!(f.logger.contains("Could not load model"));
}

#[test]
fn test_model_with_dangling_split_degrades_to_no_model() {
    let f = Fixture::new("dangling");
    f.capture(HandPose::Open, 4);
    f.capture(HandPose::Fist, 4);
    let mut trainer = f.restarted();
    trainer.train().unwrap();

    let path = trainer.model_path().to_path_buf();
    let mut model: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    model["trees"][0]["nodes"] = serde_json::json!([
        {"Split": {"feature": 0, "threshold": 0.0, "left": 99, "right": 99}}
    ]);
    std::fs::write(&path, model.to_string()).unwrap();

    let mut reloaded = f.restarted();
    reloaded.start().unwrap();

    assert!(!reloaded.model_exists());
    assert!(f.logger.contains("Could not load model"));
    assert!(matches!(
        reloaded.classify(&f.sample(HandPose::Fist)),
        Err(GestureError::ModelNotLoaded)
    ));
}

#[test]
fn test_failed_save_keeps_model_but_leaves_training_unfinished() {
    let mut f = Fixture::new("unwritable");
    f.capture(HandPose::Open, 4);
    f.capture(HandPose::Fist, 4);
    let writable_root = &f.config.storage.writable_root;
    std::fs::create_dir_all(writable_root).unwrap();
    std::fs::write(writable_root.join("Model"), "in the way").unwrap();

    let result = f.classifier.train();

    assert!(matches!(result, Err(GestureError::Persistence { .. })));
    assert!(f.classifier.model_exists());
    assert!(!f.classifier.training_finished());
    assert_eq!(f.classifier.classify(&f.sample(HandPose::Fist)).unwrap(), "fist");
}

#[test]
fn test_save_without_model_fails() {
    let f = Fixture::new("save-empty");

    let result = f.classifier.save(f.classifier.model_path());

    assert!(matches!(result, Err(GestureError::ModelNotLoaded)));
}

#[test]
fn test_accuracy_is_reported_every_batch() {
    let mut f = Fixture::with_config("accuracy", |config| {
        config.classifier.calculate_accuracy = true;
        config.classifier.test_outputs = vec![0, 0, 1, 1];
    });
    f.capture(HandPose::Open, 8);
    f.capture(HandPose::Fist, 8);
    f.classifier.train().unwrap();

    for pose in [HandPose::Open, HandPose::Open, HandPose::Fist] {
        f.classifier.classify(&f.sample(pose)).unwrap();
    }
    assert!(f.classifier.last_evaluation().is_none());

    f.classifier.classify(&f.sample(HandPose::Open)).unwrap();

    let matrix = f.classifier.last_evaluation().unwrap();
    assert_eq!(matrix.total(), 4);
    assert!((matrix.accuracy() - 0.75).abs() < 1e-12);
    assert!((matrix.error() - 0.25).abs() < 1e-12);
    assert!(f.logger.contains("Accuracy 0.750"));
}

/// Refuses every accuracy report; everything else is accepted.
struct AccuracyRefusingLogger;

impl Logger for AccuracyRefusingLogger {
    fn log(&self, _level: Level, message: &str) -> Result<(), BoxError> {
        if message.starts_with("Accuracy") {
            return Err("log sink is full".into());
        }
        Ok(())
    }

    fn with_namespace(&self, _namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(AccuracyRefusingLogger)
    }
}

#[test]
fn test_failed_accuracy_report_does_not_fail_classify() {
    let f = Fixture::with_config("accuracy-log", |config| {
        config.classifier.calculate_accuracy = true;
        config.classifier.test_outputs = vec![0, 1];
    });
    f.capture(HandPose::Open, 8);
    f.capture(HandPose::Fist, 8);
    let mut classifier = GestureClassifier::new(
        &f.config,
        f.store.clone(),
        f.model_store.clone(),
        Arc::new(AccuracyRefusingLogger),
    );
    classifier.train().unwrap();

    assert_eq!(classifier.classify(&f.sample(HandPose::Open)).unwrap(), "open");
    assert_eq!(classifier.classify(&f.sample(HandPose::Fist)).unwrap(), "fist");
    assert_eq!(classifier.last_evaluation().unwrap().total(), 2);
}

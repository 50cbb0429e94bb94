mod support;

use support::{config_env::ConfigHomeGuard, model::write_fixture_model};

use mbpredict::{
    config::{self, AppConfig},
    egui_app::controller::{FormEvent, PredictionController},
    form::Field,
    i18n::Language,
    ml::{self, DEFAULT_MODEL_FILE, ModelHandle, ModelLoadError},
};
use tempfile::TempDir;

fn load_fixture() -> (TempDir, ModelHandle) {
    let temp = tempfile::tempdir().expect("create tempdir");
    let path = temp.path().join(DEFAULT_MODEL_FILE);
    write_fixture_model(&path);
    let model = ml::load_model(&path, None).expect("load fixture model");
    (temp, model)
}

fn csv_lines(controller: &PredictionController) -> Vec<String> {
    let export = controller.export().expect("export after prediction");
    String::from_utf8(export.bytes)
        .expect("utf-8 csv")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn default_inputs_predict_and_export_one_row() {
    let (_temp, model) = load_fixture();
    let mut controller = PredictionController::new(model);

    let view = controller.handle(FormEvent::Predict).expect("predict");
    assert_eq!(
        view.result_text.as_deref(),
        Some("✅ Predicted MB degradation: 80.25%")
    );
    assert!(view.download.is_some());

    let lines = csv_lines(&controller);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].split(',').count(), 7);
    assert_eq!(lines[1], "298.0,50.0,10.0,0.5,60.0,7.0,80.25");
}

#[test]
fn predictions_stay_finite_across_the_input_range() {
    let (_temp, model) = load_fixture();
    let mut controller = PredictionController::new(model);
    for ph in [1.0, 4.5, 9.0, 9.1, 14.0] {
        for oxidant in [0.0, 5.0, 12.5] {
            controller.set_field(Field::Ph, ph);
            controller.set_field(Field::OxidantConcentration, oxidant);
            let result = controller.predict().expect("predict");
            assert!(result.percent.is_finite());
        }
    }
}

#[test]
fn editing_after_submit_hides_result_until_next_submit() {
    let (_temp, model) = load_fixture();
    let mut controller = PredictionController::new(model);
    controller.handle(FormEvent::Predict).expect("predict");

    let view = controller
        .handle(FormEvent::SetField(Field::Ph, 10.0))
        .expect("edit");
    assert!(view.result_text.is_none());
    assert!(view.download.is_none());
    assert!(controller.export().is_none());

    let view = controller.handle(FormEvent::Predict).expect("predict");
    assert_eq!(
        view.result_text.as_deref(),
        Some("✅ Predicted MB degradation: 72.50%")
    );
}

#[test]
fn chinese_export_keeps_values_and_relabels() {
    let (_temp, model) = load_fixture();
    let mut controller = PredictionController::new(model);
    controller.set_field(Field::ReactionTime, 20.0);
    controller.handle(FormEvent::Predict).expect("predict");
    let english = csv_lines(&controller);

    controller
        .handle(FormEvent::SelectLanguage(Language::Chinese))
        .expect("switch language");
    let chinese = csv_lines(&controller);
    assert_eq!(english[1], chinese[1]);
    assert!(chinese[0].starts_with("🌡 反应温度 (K),"));
    assert_eq!(
        controller.export().expect("export").file_name,
        "预测结果.csv"
    );
}

#[test]
fn settings_from_config_home_seed_the_controller() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = ConfigHomeGuard::set(temp.path().join("config"));
    let mut cfg = AppConfig::default();
    cfg.ui.language = Language::Chinese;
    cfg.export.result_header = Some("degradation_pct".into());
    config::save(&cfg).expect("save config");

    let loaded = config::load_or_default().expect("load config");
    assert_eq!(loaded, cfg);

    let model_path = temp.path().join(DEFAULT_MODEL_FILE);
    write_fixture_model(&model_path);
    let model = ml::load_model(&model_path, None).expect("load model");
    let mut controller = PredictionController::from_config(model, &loaded);
    assert_eq!(controller.language(), Language::Chinese);
    controller.predict().expect("predict");
    let lines = csv_lines(&controller);
    assert!(lines[0].ends_with(",degradation_pct"));
}

#[test]
fn truncated_artifact_fails_to_load() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let path = temp.path().join(DEFAULT_MODEL_FILE);
    write_fixture_model(&path);
    let bytes = std::fs::read(&path).expect("read model");
    std::fs::write(&path, &bytes[..bytes.len() / 2]).expect("truncate model");

    let err = ml::load_model(&path, None).err().expect("load must fail");
    assert!(matches!(err, ModelLoadError::Parse { .. }));
}

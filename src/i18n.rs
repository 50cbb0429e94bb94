//! Display strings for the two supported languages.
//!
//! Bundles are static tables; switching language swaps the table and never
//! touches the numeric form state.

use serde::{Deserialize, Serialize};

use crate::form::FIELD_COUNT;

/// Language offered by the radio toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    /// Every selectable language, in radio order.
    pub const ALL: [Language; 2] = [Language::English, Language::Chinese];

    /// Name shown on the radio button, always in the language itself.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "中文",
        }
    }

    /// Parse a short code as accepted on the command line.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "zh" | "cn" | "chinese" | "中文" => Some(Language::Chinese),
            _ => None,
        }
    }

    /// Label bundle for this language.
    pub fn labels(self) -> &'static LabelBundle {
        match self {
            Language::English => &ENGLISH,
            Language::Chinese => &CHINESE,
        }
    }
}

/// Caption of the language toggle; shown in both languages.
pub const LANGUAGE_TOGGLE_LABEL: &str = "🌐 Language / 语言";
/// Window title.
pub const WINDOW_TITLE: &str = "MB Degradation Prediction";

/// Every string the form renders for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBundle {
    pub title: &'static str,
    pub description: &'static str,
    /// Input captions, in feature order.
    pub input_labels: [&'static str; FIELD_COUNT],
    pub button_predict: &'static str,
    pub button_export: &'static str,
    pub result_prefix: &'static str,
    pub result_unit: &'static str,
    /// Suggested name of the exported CSV file.
    pub file_name: &'static str,
}

impl LabelBundle {
    /// Header of the result column in exported CSV files.
    pub fn result_header(&self) -> String {
        format!("{} (%)", self.result_prefix)
    }

    /// Result line shown after a prediction, e.g. `✅ ...: 87.35%`.
    pub fn format_result(&self, percent: f64) -> String {
        format!("{}: {percent:.2}{}", self.result_prefix, self.result_unit)
    }
}

static ENGLISH: LabelBundle = LabelBundle {
    title: "🔬 ML prediction of MB degradation via advanced oxidation",
    description: "This app predicts the methylene blue degradation under specified experimental conditions.",
    input_labels: [
        "🌡 Reaction temperature (K)",
        "💧 MB concentration (mg/L)",
        "⚗️ Oxidant concentration (mmol/L)",
        "🧪 Catalyst dosage (g/L)",
        "⏱ Reaction time (min)",
        "🌡 pH value",
    ],
    button_predict: "🔍 Predict Degradation",
    button_export: "📁 Export CSV",
    result_prefix: "✅ Predicted MB degradation",
    result_unit: "%",
    file_name: "prediction_result.csv",
};

static CHINESE: LabelBundle = LabelBundle {
    title: "🔬 高级氧化降解亚甲蓝的机器学习预测",
    description: "本应用基于实验条件预测亚甲蓝的降解效果。",
    input_labels: [
        "🌡 反应温度 (K)",
        "💧 亚甲蓝浓度 (mg/L)",
        "⚗️ 氧化剂浓度 (mmol/L)",
        "🧪 催化剂用量 (g/L)",
        "⏱ 反应时间 (min)",
        "🌡 溶液 pH",
    ],
    button_predict: "🔍 预测降解率",
    button_export: "📁 导出 CSV",
    result_prefix: "✅ 预测的亚甲蓝降解率",
    result_unit: "%",
    file_name: "预测结果.csv",
};

//! Headless single prediction with optional CSV export.

use std::path::PathBuf;

use mbpredict::config;
use mbpredict::export::{export_csv, write_export};
use mbpredict::form::{FeatureVector, Field};
use mbpredict::i18n::Language;
use mbpredict::logging;
use mbpredict::ml;

fn main() {
    logging::init_stderr();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
struct CliOptions {
    model_path: Option<PathBuf>,
    features: FeatureVector,
    language: Option<Language>,
    csv_path: Option<PathBuf>,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let cfg = config::load_or_default().map_err(|err| err.to_string())?;
    let model_path = options
        .model_path
        .unwrap_or_else(|| ml::resolve_model_path(&cfg.model.path));
    let model = ml::load_model(&model_path, cfg.model.sha256.as_deref())
        .map_err(|err| err.to_string())?;

    let labels = options.language.unwrap_or(cfg.ui.language).labels();
    let result = ml::predict(model.as_ref(), &options.features).map_err(|err| err.to_string())?;
    for field in Field::ALL {
        println!(
            "{:<36} {}",
            labels.input_labels[field.index()],
            options.features.get(field)
        );
    }
    println!("{}", labels.format_result(result.percent));

    if let Some(path) = options.csv_path {
        let csv = export_csv(
            &options.features,
            &result,
            labels,
            cfg.export.result_header.as_deref(),
        );
        write_export(&path, &csv).map_err(|err| err.to_string())?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut model_path: Option<PathBuf> = None;
    let mut language: Option<Language> = None;
    let mut csv_path: Option<PathBuf> = None;
    let mut values = FeatureVector::default().as_array();

    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "-h" | "--help" => return Err(help_text()),
            "--model" => model_path = Some(PathBuf::from(flag_value(&args, &mut idx)?)),
            "--csv" => csv_path = Some(PathBuf::from(flag_value(&args, &mut idx)?)),
            "--lang" => {
                let value = flag_value(&args, &mut idx)?;
                language = Some(
                    Language::from_code(value)
                        .ok_or_else(|| format!("Invalid --lang value: {value}"))?,
                );
            }
            _ => {
                let field = field_for_flag(flag)
                    .ok_or_else(|| format!("Unknown argument: {flag}\n\n{}", help_text()))?;
                let value = flag_value(&args, &mut idx)?;
                let number = value
                    .parse::<f64>()
                    .ok()
                    .filter(|number| number.is_finite())
                    .ok_or_else(|| format!("Invalid {flag} value: {value}"))?;
                values[field.index()] = number;
            }
        }
        idx += 1;
    }
    Ok(CliOptions {
        model_path,
        features: FeatureVector::from_values(values),
        language,
        csv_path,
    })
}

/// Advance past `args[*idx]` and return the value that follows it.
fn flag_value<'a>(args: &'a [String], idx: &mut usize) -> Result<&'a str, String> {
    let flag = &args[*idx];
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn field_for_flag(flag: &str) -> Option<Field> {
    match flag {
        "--temperature" => Some(Field::Temperature),
        "--mb-concentration" => Some(Field::MbConcentration),
        "--oxidant" => Some(Field::OxidantConcentration),
        "--catalyst" => Some(Field::CatalystDosage),
        "--time" => Some(Field::ReactionTime),
        "--ph" => Some(Field::Ph),
        _ => None,
    }
}

fn help_text() -> String {
    [
        "mbpredict-cli",
        "",
        "Predict MB degradation for one set of experimental conditions.",
        "",
        "Usage:",
        "  mbpredict-cli [--model <path>] [--temperature K] [--mb-concentration mg/L]",
        "                [--oxidant mmol/L] [--catalyst g/L] [--time min] [--ph pH]",
        "                [--lang en|zh] [--csv <out.csv>]",
        "",
        "Unset inputs take their form defaults (298, 50, 10, 0.5, 60, 7).",
        "Values are clamped like the form: pH to [1, 14], others to >= 0.",
    ]
    .join("\n")
}

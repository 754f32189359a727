//! The orchestrator input combining both stages.

use crate::languages::{expand_language_codes, LanguageCatalog};
use crate::options::JobOptions;
use crate::transcribe::{build_transcribe_descriptor, TranscribeJobDescriptor};
use crate::translate::{build_translate_input, TranslateInput};
use serde::{Deserialize, Serialize};
use subflow_common::Result;

/// `{"Transcribe": ..., "Translate": {"Inputs": [...]}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunInput {
    pub transcribe: TranscribeJobDescriptor,
    pub translate: TranslateInput,
}

impl RunInput {
    /// Compact JSON, as submitted to the orchestrator.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, for display.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the run input for target languages that are already expanded.
pub fn build_run_input_for_languages(
    options: &JobOptions,
    target_language_codes: &[String],
) -> Result<RunInput> {
    let transcribe = build_transcribe_descriptor(options)?;
    let transcription_output_uri = transcribe.predicted_output_uri();
    let translate = build_translate_input(options, &transcription_output_uri, target_language_codes)?;

    Ok(RunInput {
        transcribe,
        translate,
    })
}

/// Build the run input, expanding `["all"]` through the language catalog.
pub async fn build_run_input(
    options: &JobOptions,
    catalog: &dyn LanguageCatalog,
) -> Result<RunInput> {
    // Fail on bad options before calling out to the catalog.
    let transcribe = build_transcribe_descriptor(options)?;
    let transcription_output_uri = transcribe.predicted_output_uri();

    let languages = expand_language_codes(
        options.translation_language_codes(),
        options.translation_source_language_code(),
        catalog,
    )
    .await?;

    let translate = build_translate_input(options, &transcription_output_uri, &languages)?;

    Ok(RunInput {
        transcribe,
        translate,
    })
}

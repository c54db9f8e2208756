pub mod output_format;
pub mod redaction_summary;

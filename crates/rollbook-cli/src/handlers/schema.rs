//! Ad-hoc schema check handler

use crate::cli::SchemaArgs;
use crate::config::Config;
use crate::error::Result;
use crate::handlers::utils;
use crate::output::OutputWriter;
use rollbook_schemas::{RuleCode, Schema, ValidationError};
use tracing::{debug, instrument};

/// Handle the schema command: structural validation of a payload against
/// a schema descriptor file, with optional strict mode.
#[instrument(skip(args, _config, output), fields(file = %args.payload.display()))]
pub fn handle_schema(
    args: SchemaArgs,
    _config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    output.info(&format!(
        "Validating {} against schema {}",
        args.payload.display(),
        args.schema.display()
    ))?;

    let payload = utils::load_value(&args.payload)?;
    let descriptor = utils::load_value(&args.schema)?;
    let schema = Schema::parse(&descriptor)?;
    debug!(strict = args.strict, "descriptor parsed");

    if schema.conforms(&payload, args.strict) {
        output.success("✓ Payload conforms to the schema")?;
        return Ok(());
    }

    output.error("✗ Payload does not conform to the schema")?;
    let error = ValidationError::new(
        "$",
        RuleCode::InvalidSchema,
        if args.strict {
            "payload does not conform to the declared schema (strict mode)"
        } else {
            "payload does not conform to the declared schema"
        },
    );
    output.validation_error(&error)?;
    Err(rollbook_schemas::Error::from(error).into())
}

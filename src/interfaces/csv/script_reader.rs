use crate::application::script::WizardCommand;
use crate::domain::draft::FieldUpdate;
use crate::error::{BookingError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum ScriptAction {
    Set,
    Advance,
    Retreat,
    Pay,
}

#[derive(Debug, Deserialize)]
struct ScriptRow {
    action: ScriptAction,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

impl ScriptRow {
    fn into_command(self) -> Result<WizardCommand> {
        match self.action {
            ScriptAction::Set => {
                let field = self.field.ok_or_else(|| {
                    BookingError::ScriptError("'set' requires a field name".to_string())
                })?;
                let value = self.value.unwrap_or_default();
                Ok(WizardCommand::Set(FieldUpdate::parse(&field, &value)?))
            }
            ScriptAction::Advance => Ok(WizardCommand::Advance),
            ScriptAction::Retreat => Ok(WizardCommand::Retreat),
            ScriptAction::Pay => Ok(WizardCommand::Pay),
        }
    }
}

/// Reads a booking script: one wizard action per CSV row.
///
/// ```text
/// action, field, value
/// set, roomType, lakeside
/// advance, ,
/// ```
pub struct ScriptReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScriptReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields the commands in file order.
    pub fn commands(self) -> impl Iterator<Item = Result<WizardCommand>> {
        self.reader
            .into_deserialize::<ScriptRow>()
            .map(|result| {
                result
                    .map_err(BookingError::from)
                    .and_then(ScriptRow::into_command)
            })
    }
}

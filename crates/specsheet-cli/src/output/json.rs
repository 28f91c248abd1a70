use serde::Serialize;
use specsheet_core::error::SpecSheetError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), SpecSheetError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

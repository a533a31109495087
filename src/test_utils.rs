use crate::{FIELD_COUNT, PartialDate, TimeUnit};

/// Builds a date from its leading fields, year first
pub fn date(values: &[u16]) -> PartialDate {
    assert!(values.len() <= FIELD_COUNT, "too many fields: {values:?}");
    let mut fields = [None; FIELD_COUNT];
    for (slot, value) in fields.iter_mut().zip(values) {
        *slot = Some(*value);
    }
    PartialDate::from_fields(fields).unwrap_or_else(|e| panic!("invalid test date {values:?}: {e}"))
}

/// Field array holding a single `unit`
pub fn fields(unit: TimeUnit, value: u16) -> [Option<u16>; FIELD_COUNT] {
    let mut fields = [None; FIELD_COUNT];
    fields[unit.index()] = Some(value);
    fields
}

/// Wraps `payload` in the separator-heavy noise used by the filename tests
pub fn noisy(payload: &str) -> String {
    format!("a_-./;,ab_-{payload}a_-./;,ab_-")
}

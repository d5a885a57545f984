use time::{
    format_description::well_known::Rfc3339, Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

pub(crate) fn primitive_now_utc() -> PrimitiveDateTime {
    to_primitive_utc(OffsetDateTime::now_utc())
}

pub(crate) fn to_primitive_utc(value: OffsetDateTime) -> PrimitiveDateTime {
    let utc = value.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}

pub(crate) fn format_primitive(value: PrimitiveDateTime) -> String {
    value.assume_utc().format(&Rfc3339).unwrap_or_else(|_| value.assume_utc().to_string())
}

/// `YYYY-MM-DD`.
pub(crate) fn format_date(value: Date) -> String {
    let (year, month, day) = (value.year(), u8::from(value.month()), value.day());
    format!("{year:04}-{month:02}-{day:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn format_primitive_outputs_utc_z() {
        assert_eq!(format_primitive(datetime!(2025-01-02 10:20:30)), "2025-01-02T10:20:30Z");
    }

    #[test]
    fn to_primitive_utc_shifts_offset() {
        let value = datetime!(2025-01-02 13:20:30 +3);
        assert_eq!(to_primitive_utc(value), datetime!(2025-01-02 10:20:30));
    }

    #[test]
    fn format_date_pads_components() {
        assert_eq!(format_date(date!(2024-03-07)), "2024-03-07");
    }
}

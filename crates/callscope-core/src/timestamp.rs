//! RFC 1123 timestamps for report headers.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::Result;

/// Format an instant the way HTTP dates are written.
///
/// A zero offset is rendered as `GMT`, any other offset as `+HHMM`/`-HHMM`.
pub fn format_rfc1123(at: OffsetDateTime) -> Result<String> {
    // e.g. `Tue, 3 Jun 2008 11:05:30`
    let date_time = at.format(format_description!(
        "[weekday repr:short], [day padding:none] [month repr:short] [year] [hour]:[minute]:[second]"
    ))?;
    let zone = if at.offset().is_utc() {
        "GMT".to_string()
    } else {
        at.format(format_description!(
            "[offset_hour sign:mandatory][offset_minute]"
        ))?
    };
    Ok(format!("{date_time} {zone}"))
}

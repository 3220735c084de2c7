// Label tables for the integer codes reported by the battery service

pub fn battery_status_label(code: i64) -> String {
    let label = match code {
        1 => "Unknown",
        2 => "Charging",
        3 => "Discharging",
        4 => "Not Charging",
        5 => "Full",
        6 => "Wireless",
        _ => return unknown(code),
    };
    label.to_string()
}

/// Plug codes are zero-based: 0 means nothing is connected.
pub fn plug_type_label(code: i64) -> String {
    let label = match code {
        0 => "Unplugged",
        1 => "AC",
        2 => "USB",
        3 => "Unknown",
        _ => return unknown(code),
    };
    label.to_string()
}

fn unknown(code: i64) -> String {
    format!("Unknown ({})", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(battery_status_label(2), "Charging");
        assert_eq!(battery_status_label(4), "Not Charging");
        assert_eq!(plug_type_label(0), "Unplugged");
        assert_eq!(plug_type_label(2), "USB");
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(battery_status_label(0), "Unknown (0)");
        assert_eq!(battery_status_label(42), "Unknown (42)");
        assert_eq!(plug_type_label(-1), "Unknown (-1)");
    }
}

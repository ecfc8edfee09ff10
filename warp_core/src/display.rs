use crate::mode::TimeMode;
use crate::table::ModeTable;

/// Formats a multiplier the way the time panel shows it: whole multipliers as
/// `"2x"` / `"10,000x"`, fractions as `"1/4x"`, and zero as an empty string.
pub fn format_multiplier(multiplier: f64) -> String {
    if multiplier >= 1.0 {
        format!("{}x", group_thousands(multiplier as u64))
    } else if multiplier > 0.0 {
        format!("1/{}x", group_thousands((1.0 / multiplier) as u64))
    } else {
        String::new()
    }
}

/// Label for a mode button: the mode's own label if it has one, otherwise its
/// formatted multiplier.
pub fn mode_label(mode: &TimeMode) -> String {
    match mode.label() {
        Some(label) => label.to_string(),
        None => format_multiplier(mode.multiplier()),
    }
}

/// Formats a slot picker value; slots that don't address the table are blank.
pub fn slot_label(table: &ModeTable, slot: usize) -> String {
    table
        .get(slot)
        .map(|mode| format_multiplier(mode.multiplier()))
        .unwrap_or_default()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WarpSettings;

    #[test]
    fn test_format_whole_multipliers() {
        assert_eq!(format_multiplier(1.0), "1x");
        assert_eq!(format_multiplier(2.0), "2x");
        assert_eq!(format_multiplier(2_500.0), "2,500x");
        assert_eq!(format_multiplier(100_000_000.0), "100,000,000x");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_multiplier(0.25), "1/4x");
        assert_eq!(format_multiplier(1.0 / 64.0), "1/64x");
    }

    #[test]
    fn test_format_zero_is_blank() {
        assert_eq!(format_multiplier(0.0), "");
    }

    #[test]
    fn test_mode_and_slot_labels() {
        let table = ModeTable::rebuild(&WarpSettings::default());
        assert_eq!(mode_label(&table.modes()[0]), "Paused");
        assert_eq!(mode_label(&table.modes()[5]), "Slow-Mo");
        assert_eq!(mode_label(&table.modes()[6]), "1/2x");
        assert_eq!(mode_label(&table.modes()[16]), "10,000x");
        assert_eq!(slot_label(&table, 5), "1/4x");
        assert_eq!(slot_label(&table, 8), "2x");
        assert_eq!(slot_label(&table, 40), "");
    }
}

/// Formats a whole-unit UGX amount with thousands separators, e.g. `2,000 UGX`.
pub fn format_ugx(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{grouped} UGX")
    } else {
        format!("{grouped} UGX")
    }
}

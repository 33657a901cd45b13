//! # Liability Parser
//!
//! Reads the liability list format:
//!
//! ```text
//! # optional comments
//! account_id,amount
//! alice,20000
//! bob,30000
//! ```
//!
//! - Blank lines and lines whose first non-space character is `#` are
//!   dropped.
//! - If the first retained line, lowercased, contains `account`, it is the
//!   header and is dropped.
//! - Only the first two comma-separated fields are used. Rows with fewer
//!   than two fields are skipped with a warning.
//! - Line numbers in errors are 1-based physical lines of the input.

use serde::{Deserialize, Serialize};

use zkr_core::{LiabilityRecord, ParseError};

/// How the amount column is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountPolicy {
    /// The trimmed field must be one or more ASCII digits.
    #[default]
    Strict,
    /// Drop every non-digit character first; an empty result is zero.
    /// Lossy: `-5` reads as 5 and `1.50` as 150.
    StripNonDigits,
}

/// Parser output: records in input order plus their exact sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLiabilities {
    pub records: Vec<LiabilityRecord>,
    pub total_liability: u64,
}

/// Parse liability text under `policy`.
pub fn parse_liabilities(
    text: &str,
    policy: AmountPolicy,
) -> Result<ParsedLiabilities, ParseError> {
    let mut rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if let Some((_, first)) = rows.first() {
        if first.to_lowercase().contains("account") {
            rows.remove(0);
        }
    }
    if rows.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut total: u64 = 0;
    for (line, row) in rows {
        let mut fields = row.split(',');
        let (account_id, raw_amount) = match (fields.next(), fields.next()) {
            (Some(id), Some(amount)) => (id.trim(), amount.trim()),
            _ => {
                tracing::warn!(line, "skipping liability row with fewer than two fields");
                continue;
            }
        };
        let amount = parse_amount(raw_amount, policy, line)?;
        total = total
            .checked_add(amount)
            .ok_or(ParseError::TotalOverflow { line })?;
        records.push(LiabilityRecord::new(account_id, amount));
    }

    if records.is_empty() {
        return Err(ParseError::NoValidRows);
    }
    tracing::debug!(
        rows = records.len(),
        total_liability = total,
        "parsed liability list"
    );
    Ok(ParsedLiabilities {
        records,
        total_liability: total,
    })
}

fn parse_amount(raw: &str, policy: AmountPolicy, line: usize) -> Result<u64, ParseError> {
    let digits: String = match policy {
        AmountPolicy::Strict => {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::InvalidAmount {
                    line,
                    value: raw.to_string(),
                });
            }
            raw.to_string()
        }
        AmountPolicy::StripNonDigits => {
            let kept: String = raw.chars().filter(char::is_ascii_digit).collect();
            if kept.is_empty() {
                return Ok(0);
            }
            kept
        }
    };
    digits
        .parse::<u64>()
        .map_err(|_| ParseError::AmountOverflow { line })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "alice,20000\nbob,30000\ncarol,15000\ndave,12000\neve,8000";

    #[test]
    fn test_parse_sample() {
        let parsed = parse_liabilities(SAMPLE, AmountPolicy::Strict).unwrap();
        assert_eq!(parsed.records.len(), 5);
        assert_eq!(parsed.total_liability, 85_000);
        assert_eq!(parsed.records[0], LiabilityRecord::new("alice", 20_000));
        assert_eq!(parsed.records[4], LiabilityRecord::new("eve", 8_000));
    }

    #[test]
    fn test_header_comments_and_blanks_dropped() {
        let text = "# exported 2026-01-15\n\nAccount_ID,Amount\r\nalice,1\n  # inline\nbob,2\n";
        let parsed = parse_liabilities(text, AmountPolicy::Strict).unwrap();
        assert_eq!(
            parsed.records,
            vec![LiabilityRecord::new("alice", 1), LiabilityRecord::new("bob", 2)]
        );
    }

    #[test]
    fn test_header_only_detected_on_first_row() {
        let text = "alice,1\naccount-7,2";
        let parsed = parse_liabilities(text, AmountPolicy::Strict).unwrap();
        assert_eq!(parsed.records[1].account_id, "account-7");
    }

    #[test]
    fn test_extra_fields_ignored_and_values_trimmed() {
        let parsed = parse_liabilities(" alice , 5 ,memo,x", AmountPolicy::Strict).unwrap();
        assert_eq!(parsed.records, vec![LiabilityRecord::new("alice", 5)]);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let parsed = parse_liabilities("a,1\na,1", AmountPolicy::Strict).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.total_liability, 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            parse_liabilities("", AmountPolicy::Strict),
            Err(ParseError::EmptyInput)
        );
        assert_eq!(
            parse_liabilities("# only\n\naccount,amount\n", AmountPolicy::Strict),
            Err(ParseError::EmptyInput)
        );
    }

    #[test]
    fn test_no_valid_rows() {
        assert_eq!(
            parse_liabilities("alice\nbob", AmountPolicy::Strict),
            Err(ParseError::NoValidRows)
        );
    }

    #[test]
    fn test_short_rows_skipped() {
        let parsed = parse_liabilities("alice\nbob,7", AmountPolicy::Strict).unwrap();
        assert_eq!(parsed.records, vec![LiabilityRecord::new("bob", 7)]);
    }

    #[test]
    fn test_strict_rejects_non_digits_with_line() {
        let text = "account,amount\nalice,10\nbob,-5";
        assert_eq!(
            parse_liabilities(text, AmountPolicy::Strict),
            Err(ParseError::InvalidAmount {
                line: 3,
                value: "-5".into()
            })
        );
        assert!(matches!(
            parse_liabilities("alice,1.50", AmountPolicy::Strict),
            Err(ParseError::InvalidAmount { line: 1, .. })
        ));
        assert!(matches!(
            parse_liabilities("alice,", AmountPolicy::Strict),
            Err(ParseError::InvalidAmount { line: 1, .. })
        ));
    }

    #[test]
    fn test_strip_policy_is_lossy() {
        let parsed =
            parse_liabilities("a,-5\nb,1.50\nc,$1_000\nd,n/a", AmountPolicy::StripNonDigits)
                .unwrap();
        let amounts: Vec<u64> = parsed.records.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![5, 150, 1_000, 0]);
    }

    #[test]
    fn test_amount_overflow() {
        let text = "alice,18446744073709551616";
        assert_eq!(
            parse_liabilities(text, AmountPolicy::Strict),
            Err(ParseError::AmountOverflow { line: 1 })
        );
    }

    #[test]
    fn test_total_overflow() {
        let text = format!("a,{}\nb,1", u64::MAX);
        assert_eq!(
            parse_liabilities(&text, AmountPolicy::Strict),
            Err(ParseError::TotalOverflow { line: 2 })
        );
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(
            serde_json::to_string(&AmountPolicy::StripNonDigits).unwrap(),
            "\"strip_non_digits\""
        );
        assert_eq!(AmountPolicy::default(), AmountPolicy::Strict);
    }
}

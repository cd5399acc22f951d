//! Cookie payload decoding — recovers the shared cookie name and the
//! (ingredient, amount) pairs from a cookie-creation payload.
//!
//! The payload shape is fixed but non-standard:
//! `{ "cookieName": "<name>", "recipe": [ {"ingredient": …, "amount": …}, … ] }`
//!
//! The outer structure is scanned manually with explicit bounds checks: the
//! name field sits before the first `[`, entries are split on the `"},"
//! boundary, and the final entry carries the array terminator. Only the
//! individual entry objects go through serde_json. Reordered fields, nested
//! arrays, or escaped braces inside strings are out of contract; anything
//! that breaks the recognised boundaries fails the whole decode.

use serde::Deserialize;

use crate::core::error::DecodeError;
use crate::core::types::RecipeEntry;

/// Inter-entry boundary. Splitting on it consumes the closing brace of every
/// entry except the last.
const ENTRY_BOUNDARY: &str = "},";

#[derive(Debug, Deserialize)]
struct EntryFields {
    ingredient: String,
    amount: i64,
}

/// Extract the shared cookie name from everything before the recipe array:
/// scan to the first name separator, capture up to the next field separator,
/// then strip exactly one leading and one trailing quote.
fn scan_name(head: &str) -> Result<String, DecodeError> {
    let after_sep = head
        .find(':')
        .map(|i| &head[i + 1..])
        .ok_or(DecodeError::MissingNameField)?;
    let span = after_sep
        .find(',')
        .map(|i| &after_sep[..i])
        .ok_or(DecodeError::UnterminatedName)?;
    let name = span
        .trim()
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(DecodeError::UnquotedName)?;
    if name.is_empty() {
        return Err(DecodeError::UnquotedName);
    }
    Ok(name.to_string())
}

fn decode_entry(obj: &str, cookie: &str) -> Result<RecipeEntry, DecodeError> {
    let fields: EntryFields =
        serde_json::from_str(obj).map_err(|e| DecodeError::InvalidEntry(e.to_string()))?;
    if fields.amount <= 0 {
        return Err(DecodeError::InvalidAmount(fields.amount));
    }
    Ok(RecipeEntry {
        cookie: cookie.to_string(),
        ingredient: fields.ingredient,
        amount: fields.amount,
    })
}

/// Decode one cookie-creation payload into its recipe entries, all sharing
/// the captured cookie name, in payload order. Any failure aborts the whole
/// decode; no partial sequence escapes.
pub fn decode_cookie_payload(body: &str) -> Result<Vec<RecipeEntry>, DecodeError> {
    let (head, tail) = body
        .split_once('[')
        .ok_or(DecodeError::MissingRecipeArray)?;
    let cookie = scan_name(head)?;

    if tail.trim_start().starts_with(']') {
        return Err(DecodeError::EmptyRecipe);
    }

    let chunks: Vec<&str> = tail.split(ENTRY_BOUNDARY).collect();
    let last = chunks.len() - 1;
    let mut entries = Vec::with_capacity(chunks.len());

    for (i, chunk) in chunks.iter().enumerate() {
        if i < last {
            // The boundary split consumed this entry's closing brace.
            entries.push(decode_entry(&format!("{chunk}}}"), &cookie)?);
        } else {
            // The final chunk still carries the array terminator and the
            // payload's closing brace.
            let end = chunk.find(']').ok_or(DecodeError::UnterminatedEntry)?;
            let trailer = chunk[end + 1..].trim();
            if trailer != "}" {
                return Err(DecodeError::TrailingGarbage(trailer.to_string()));
            }
            entries.push(decode_entry(&chunk[..end], &cookie)?);
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_entry_payload() {
        let body = r#"{"cookieName":"Choco","recipe":[{"ingredient":"Flour","amount":200},{"ingredient":"Sugar","amount":50}]}"#;
        let entries = decode_cookie_payload(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.cookie == "Choco"));
        assert_eq!(entries[0].ingredient, "Flour");
        assert_eq!(entries[0].amount, 200);
        assert_eq!(entries[1].ingredient, "Sugar");
        assert_eq!(entries[1].amount, 50);
    }

    #[test]
    fn test_single_entry_payload() {
        let body = r#"{"cookieName":"Tango","recipe":[{"ingredient":"Butter","amount":200}]}"#;
        let entries = decode_cookie_payload(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cookie, "Tango");
        assert_eq!(entries[0].ingredient, "Butter");
        assert_eq!(entries[0].amount, 200);
    }

    #[test]
    fn test_whitespace_and_newlines_tolerated() {
        let body = "{ \"cookieName\": \"Almond delight\",\n  \"recipe\": [\n    {\"ingredient\": \"Chopped almonds\", \"amount\": 279},\n    {\"ingredient\": \"Flour\", \"amount\": 400}\n  ]\n}\n";
        let entries = decode_cookie_payload(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.cookie == "Almond delight"));
        assert_eq!(entries[1].ingredient, "Flour");
    }

    #[test]
    fn test_payload_order_preserved() {
        let body = r#"{"cookieName":"Nut ring","recipe":[{"ingredient":"Flour","amount":450},{"ingredient":"Butter","amount":450},{"ingredient":"Icing sugar","amount":190}]}"#;
        let entries = decode_cookie_payload(body).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.ingredient.as_str()).collect();
        assert_eq!(names, vec!["Flour", "Butter", "Icing sugar"]);
    }

    #[test]
    fn test_missing_array_fails() {
        let body = r#"{"cookieName":"Choco"}"#;
        assert_eq!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::MissingRecipeArray
        );
    }

    #[test]
    fn test_missing_name_separator_fails() {
        let body = r#"{"cookieName" "Choco","recipe":[{"ingredient":"Flour","amount":200}]}"#;
        // The head still holds a ':' from "recipe": — remove it entirely.
        let body2 = body.replacen("\"recipe\":", "\"recipe\"", 1);
        assert_eq!(
            decode_cookie_payload(&body2).unwrap_err(),
            DecodeError::MissingNameField
        );
    }

    #[test]
    fn test_name_without_field_separator_fails() {
        let body = r#"{"cookieName":"Choco" "recipe":[{"ingredient":"Flour","amount":200}]}"#;
        assert_eq!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::UnterminatedName
        );
    }

    #[test]
    fn test_unquoted_name_fails() {
        let body = r#"{"cookieName":Choco,"recipe":[{"ingredient":"Flour","amount":200}]}"#;
        assert_eq!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::UnquotedName
        );
    }

    #[test]
    fn test_empty_recipe_fails() {
        let body = r#"{"cookieName":"Choco","recipe":[]}"#;
        assert_eq!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::EmptyRecipe
        );
    }

    #[test]
    fn test_unterminated_array_fails() {
        let body = r#"{"cookieName":"Choco","recipe":[{"ingredient":"Flour","amount":200}"#;
        assert_eq!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::UnterminatedEntry
        );
    }

    #[test]
    fn test_trailing_garbage_fails() {
        let body = r#"{"cookieName":"Choco","recipe":[{"ingredient":"Flour","amount":200}], "extra": 1}"#;
        assert!(matches!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::TrailingGarbage(_)
        ));
    }

    #[test]
    fn test_malformed_entry_fails_whole_decode() {
        let body = r#"{"cookieName":"Choco","recipe":[{"ingredient":"Flour","amount":200},{"ingredient":"Sugar"}]}"#;
        assert!(matches!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::InvalidEntry(_)
        ));
    }

    #[test]
    fn test_zero_amount_fails() {
        let body = r#"{"cookieName":"Choco","recipe":[{"ingredient":"Flour","amount":0}]}"#;
        assert_eq!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::InvalidAmount(0)
        );
    }

    #[test]
    fn test_negative_amount_fails() {
        let body = r#"{"cookieName":"Choco","recipe":[{"ingredient":"Flour","amount":-5}]}"#;
        assert_eq!(
            decode_cookie_payload(body).unwrap_err(),
            DecodeError::InvalidAmount(-5)
        );
    }
}

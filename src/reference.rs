//! Reference code generation for printed documents.

use rand::Rng;

use crate::model::DocumentKind;

/// Mints a reference code such as `INV-4821` or `QU-1093`.
///
/// The four-digit suffix is drawn uniformly from 1000-9999.  No uniqueness
/// guarantee is made against previously issued codes; documents are not
/// persisted by identifier, so collisions are an accepted limitation.
/// Dispatch reports carry no reference and are keyed by their generation
/// timestamp instead, so this returns `None` for them.
pub fn reference_code(kind: DocumentKind) -> Option<String> {
    let prefix = kind.reference_prefix()?;
    let number: u32 = rand::thread_rng().gen_range(1000..=9999);
    Some(format!("{prefix}-{number}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_codes_have_the_expected_shape() {
        for _ in 0..200 {
            let code = reference_code(DocumentKind::Invoice).unwrap();
            let suffix = code.strip_prefix("INV-").expect("INV- prefix");
            assert_eq!(suffix.len(), 4);
            assert!(suffix.chars().all(|c| c.is_ascii_digit()));
            let number: u32 = suffix.parse().unwrap();
            assert!((1000..=9999).contains(&number));
        }
    }

    #[test]
    fn quotation_codes_use_the_qu_prefix() {
        let code = reference_code(DocumentKind::Quotation).unwrap();
        assert!(code.starts_with("QU-"));
        assert_eq!(code.len(), 7);
    }

    #[test]
    fn reports_have_no_reference() {
        assert_eq!(reference_code(DocumentKind::PostOfficeReport), None);
    }
}

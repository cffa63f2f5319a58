// Printable document renderers, one per paper form.
// Each renderer turns a plain data record into a standalone HTML page with
// @page CSS sized to the physical form; the browser handles printing.

pub mod cn38;
pub mod customs_declaration;
pub mod customs_sheet;
pub mod handlers;
pub mod html;
pub mod shipping_label;
pub mod unitizer;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// Paginated customs declaration with supplementary sheets.
    CustomsDeclaration,
    /// 10×15 cm shipping label.
    ShippingLabel,
    /// A4 bilingual customs documents.
    CustomsDocuments,
    /// Airline delivery bill.
    Cn38,
    /// Receptacle tag.
    Unitizer,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::CustomsDeclaration,
        DocumentKind::ShippingLabel,
        DocumentKind::CustomsDocuments,
        DocumentKind::Cn38,
        DocumentKind::Unitizer,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            DocumentKind::CustomsDeclaration => "customs-declaration",
            DocumentKind::ShippingLabel => "shipping-label",
            DocumentKind::CustomsDocuments => "customs-documents",
            DocumentKind::Cn38 => "cn38",
            DocumentKind::Unitizer => "unitizer",
        }
    }

    /// Whether the document needs operator-entered form fields.
    pub fn takes_form(self) -> bool {
        matches!(self, DocumentKind::Cn38 | DocumentKind::Unitizer)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DocumentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = DocumentKind::ALL.iter().map(|k| k.slug()).collect();
                AppError::Validation(format!(
                    "unknown document kind '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for kind in DocumentKind::ALL {
            assert_eq!(kind.slug().parse::<DocumentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_validation_error() {
        let err = "cn23".parse::<DocumentKind>().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("cn38")));
    }
}

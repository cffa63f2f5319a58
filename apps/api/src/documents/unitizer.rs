use chrono::Utc;
use serde::Deserialize;

use crate::customs::format::{date_br, weight_point};
use crate::customs::Weight;
use crate::documents::html::{div, document, escape};
use crate::models::order::OrderItemRow;

/// Operator-entered fields of the receptacle (bag) tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UnitizerForm {
    pub dispatch_number: String,
    pub serial_number: String,
    pub flight_number: String,
    pub awb_number: String,
    pub dispatch_date: String,
    pub origin_airport: String,
    pub destination_airport: String,
    pub service: String,
    pub barcode: String,
    /// Printed instead of the item-derived piece count when set.
    pub quantity: Option<String>,
    /// Printed instead of the item-derived weight (kg) when set.
    pub weight: Option<String>,
}

impl Default for UnitizerForm {
    fn default() -> Self {
        UnitizerForm {
            dispatch_number: "123456".to_string(),
            serial_number: "BRA001".to_string(),
            flight_number: "LA123".to_string(),
            awb_number: "123-45678901".to_string(),
            dispatch_date: date_br(&Utc::now()),
            origin_airport: "GRU - São Paulo".to_string(),
            destination_airport: "Unknown".to_string(),
            service: "PACKET STANDARD".to_string(),
            barcode: "USDHLGBRSAODANX2000100100020".to_string(),
            quantity: None,
            weight: None,
        }
    }
}

/// Piece count and gross weight printed on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceptacleContents {
    pub quantity: usize,
    pub weight: Weight,
}

impl ReceptacleContents {
    /// One piece per item record; each record weighs its stored per-unit
    /// weight or `fallback` when none is stored.
    pub fn from_rows(rows: &[OrderItemRow], fallback: Weight) -> Self {
        if rows.is_empty() {
            return ReceptacleContents {
                quantity: 1,
                weight: fallback,
            };
        }
        ReceptacleContents {
            quantity: rows.len(),
            weight: rows
                .iter()
                .map(|r| match r.weight_grams {
                    Some(g) if g >= 0 => Weight::from_grams(g).unwrap_or(fallback),
                    _ => fallback,
                })
                .sum(),
        }
    }
}

const CSS: &str = r#"
@page { size: 100mm 150mm; margin: 0; }
body { margin: 0; font-family: Arial, sans-serif; font-size: 9pt; }
.tag { width: 100mm; height: 150mm; box-sizing: border-box; border: 2px solid #000; padding: 3mm; display: flex; flex-direction: column; }
.operator { text-align: center; font-weight: bold; border-bottom: 2px solid #000; padding-bottom: 2mm; }
.operator .store { font-size: 12pt; }
.row { display: flex; border-bottom: 1px solid #000; }
.row > div { flex: 1; padding: 1mm; }
.row > div + div { border-left: 1px solid #000; }
.label { font-size: 7pt; font-weight: bold; text-transform: uppercase; }
.value { font-size: 11pt; font-weight: bold; }
.barcode-visual { height: 18mm; margin-top: auto; background: repeating-linear-gradient(90deg, #000 0, #000 3px, #fff 3px, #fff 5px, #000 5px, #000 6px, #fff 6px, #fff 9px); }
.barcode-text { text-align: center; font-family: 'Courier New', monospace; font-size: 10pt; letter-spacing: 1px; }
"#;

fn pair(label: &str, value: &str) -> String {
    format!("<div>{}{}</div>", div("label", label), div("value", value))
}

fn entered(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn render(form: &UnitizerForm, store_name: &str, contents: &ReceptacleContents) -> String {
    let quantity = entered(&form.quantity)
        .map(str::to_string)
        .unwrap_or_else(|| contents.quantity.to_string());
    let weight = entered(&form.weight)
        .map(str::to_string)
        .unwrap_or_else(|| weight_point(contents.weight));

    let body = format!(
        r#"<div class="tag">
<div class="operator"><div>Empresa Brasileira de Correios e Telégrafos</div><div class="store">{store}</div></div>
<div class="row">{dispatch}{serial}</div>
<div class="row">{flight}{awb}</div>
<div class="row">{date}{service}</div>
<div class="row">{origin}{destination}</div>
<div class="row">{quantity}{weight}</div>
<div class="barcode-visual"></div>
{barcode}
</div>"#,
        store = escape(&store_name.to_uppercase()),
        dispatch = pair("Numero do Despacho", &form.dispatch_number),
        serial = pair("Numero serial da Mala", &form.serial_number),
        flight = pair("N do Vôo", &form.flight_number),
        awb = pair("N AWB", &form.awb_number),
        date = pair("Data do despacho", &form.dispatch_date),
        service = pair("Serviço", &form.service),
        origin = pair("Aeroporto de Origem", &form.origin_airport),
        destination = pair("Aeroporto de Destino", &form.destination_airport),
        quantity = pair("Quantidade", &quantity),
        weight = pair("Peso KG", &weight),
        barcode = div("barcode-text", &form.barcode),
    );

    document(&format!("Unitizador - {}", form.dispatch_number), CSS, &body)
}

use chrono::{DateTime, Utc};

use crate::config::SenderProfile;
use crate::customs::format::{datetime_br, money_point, weight_point};
use crate::customs::{LineItem, Money, Weight};
use crate::documents::html::{document, escape, field, row};
use crate::models::order::OrderRow;

pub const DEFAULT_PURPOSE: &str = "Sale of goods";

#[derive(Debug, Clone)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct ContentLine {
    pub description: String,
    pub quantity: u32,
    pub unit_value: Money,
    pub line_total: Money,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct CustomsDocumentData {
    pub cn35_number: String,
    pub tracking_number: String,
    pub sender: Party,
    pub recipient: Party,
    pub contents: Vec<ContentLine>,
    pub total_declared_value: Money,
    pub total_weight: Weight,
    pub shipment_purpose: String,
    pub country_of_origin: String,
    pub created_at: DateTime<Utc>,
}

impl CustomsDocumentData {
    pub fn from_order(order: &OrderRow, items: &[LineItem], sender: &SenderProfile) -> Self {
        let a = order.address();
        let currency = order
            .currency
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "USD".to_string());

        let city_state = a.city_state();
        let recipient_address = [
            a.address1.as_deref(),
            a.address2.as_deref(),
            Some(city_state.as_str()).filter(|s| *s != "/"),
            a.zip.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        CustomsDocumentData {
            cn35_number: order.order_number(),
            tracking_number: order.tracking_id.clone().unwrap_or_default(),
            sender: Party {
                name: sender.name_abroad.clone(),
                address: sender.city.clone(),
                country: sender.country_of_origin.clone(),
            },
            recipient: Party {
                name: order.customer_name.clone(),
                address: recipient_address,
                country: a.country.clone().unwrap_or_default(),
            },
            contents: items
                .iter()
                .map(|i| ContentLine {
                    description: i.description().to_string(),
                    quantity: i.quantity(),
                    unit_value: i.unit_value(),
                    line_total: i.total_value(),
                    currency: currency.clone(),
                })
                .collect(),
            total_declared_value: items.iter().map(LineItem::total_value).sum(),
            total_weight: items.iter().map(LineItem::weight).sum(),
            shipment_purpose: DEFAULT_PURPOSE.to_string(),
            country_of_origin: sender.country_of_origin.clone(),
            created_at: order.created_at,
        }
    }
}

const CSS: &str = r#"
@page { size: A4; margin: 2cm; }
body { margin: 0; padding: 2cm; font-family: Arial, sans-serif; font-size: 10pt; line-height: 1.5; }
.document { max-width: 21cm; margin: 0 auto; }
h1 { text-align: center; font-size: 16pt; margin-bottom: 1cm; border-bottom: 3px solid #000; padding-bottom: 0.3cm; }
.section { margin-bottom: 0.8cm; }
.section-title { font-size: 12pt; font-weight: bold; background: #f0f0f0; padding: 0.2cm 0.3cm; border-left: 4px solid #000; margin-bottom: 0.3cm; }
.info-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 0.5cm; margin-bottom: 0.5cm; }
.field { border: 1px solid #ddd; padding: 0.3cm; }
.field-label { font-size: 8pt; color: #666; text-transform: uppercase; font-weight: bold; margin-bottom: 0.1cm; }
.field-value { font-size: 11pt; }
table { width: 100%; border-collapse: collapse; margin-top: 0.3cm; }
th, td { border: 1px solid #000; padding: 0.3cm; text-align: left; }
th { background: #f0f0f0; font-weight: bold; }
.total-row { font-weight: bold; background: #f9f9f9; }
.barcode-section { text-align: center; margin: 0.5cm 0; padding: 0.5cm; border: 2px solid #000; }
.barcode-text { font-family: 'Courier New', monospace; font-size: 16pt; font-weight: bold; letter-spacing: 3px; }
@media print { body { padding: 0; } }
"#;

fn party_section(title: &str, party: &Party) -> String {
    format!(
        "<div class=\"section\"><div class=\"section-title\">{}</div>{}{}{}</div>",
        escape(title),
        field("Name / Nome", &party.name),
        field("Address / Endereço", &party.address),
        field("Country / País", &party.country),
    )
}

/// A4 bilingual customs document.
pub fn render(data: &CustomsDocumentData) -> String {
    let currency = data
        .contents
        .first()
        .map(|c| c.currency.as_str())
        .unwrap_or("USD");

    let lines: String = data
        .contents
        .iter()
        .map(|c| {
            row(&[
                c.description.clone(),
                c.quantity.to_string(),
                format!("{} {}", c.currency, money_point(c.unit_value)),
                format!("{} {}", c.currency, money_point(c.line_total)),
            ])
        })
        .collect();

    let body = format!(
        r#"<div class="document">
<h1>DOCUMENTOS ADUANEIROS / CUSTOMS DOCUMENTS</h1>
<div class="barcode-section"><div class="field-label">Tracking Number</div><div class="barcode-text">{tracking}</div></div>
<div class="info-grid">{cn35}{date}</div>
{sender}
{recipient}
<div class="section"><div class="section-title">Customs Contents / Conteúdo Aduaneiro</div>
<table><thead><tr><th>Description / Descrição</th><th style="width: 15%;">Quantity / Qtd</th><th style="width: 20%;">Unit Value / Valor Unit.</th><th style="width: 20%;">Total</th></tr></thead>
<tbody>{lines}<tr class="total-row"><td colspan="3">Total Declared Value / Valor Total Declarado</td><td>{currency} {declared}</td></tr></tbody></table>
</div>
<div class="info-grid">{weight}{purpose}</div>
{origin}
</div>"#,
        tracking = escape(&data.tracking_number),
        cn35 = field("CN35 Number", &data.cn35_number),
        date = field("Date / Data", &datetime_br(&data.created_at)),
        sender = party_section("Sender / Remetente", &data.sender),
        recipient = party_section("Recipient / Destinatário", &data.recipient),
        lines = lines,
        currency = escape(currency),
        declared = money_point(data.total_declared_value),
        weight = field(
            "Total Weight / Peso Total",
            &format!("{} kg", weight_point(data.total_weight))
        ),
        purpose = field("Shipment Purpose / Finalidade", &data.shipment_purpose),
        origin = field("Country of Origin / País de Origem", &data.country_of_origin),
    );

    document(
        &format!("Documentos Aduaneiros - {}", data.tracking_number),
        CSS,
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn party(name: &str) -> Party {
        Party {
            name: name.to_string(),
            address: "Somewhere 1".to_string(),
            country: "BR".to_string(),
        }
    }

    fn data(contents: Vec<ContentLine>) -> CustomsDocumentData {
        CustomsDocumentData {
            cn35_number: "CN-1".to_string(),
            tracking_number: "TR-9".to_string(),
            sender: party("Sender Co"),
            recipient: party("Recipient"),
            total_declared_value: contents.iter().map(|c| c.line_total).sum(),
            contents,
            total_weight: Weight::from_grams(1250).unwrap(),
            shipment_purpose: DEFAULT_PURPOSE.to_string(),
            country_of_origin: "Brasil".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 14, 30, 0).unwrap(),
        }
    }

    fn line(currency: &str, qty: u32, unit: i64) -> ContentLine {
        ContentLine {
            description: "Soap".to_string(),
            quantity: qty,
            unit_value: Money::from_cents(unit).unwrap(),
            line_total: Money::from_cents(unit * qty as i64).unwrap(),
            currency: currency.to_string(),
        }
    }

    #[test]
    fn test_total_uses_first_line_currency() {
        let html = render(&data(vec![line("BRL", 2, 350), line("BRL", 1, 100)]));
        assert!(html.contains("<td>BRL 7.00</td>"));
        assert!(html.contains("<td>BRL 8.00</td></tr></tbody>"));
        assert!(html.contains("1.25 kg"));
        assert!(html.contains("01/02/2026 14:30"));
    }

    #[test]
    fn test_empty_contents_defaults_to_usd() {
        let html = render(&data(vec![]));
        assert!(html.contains("<td>USD 0.00</td>"));
    }
}

//! Customs declaration (CN23-style) with supplementary continuation sheets.
//!
//! One sheet is emitted per [`Page`]. Freight and insurance are printed on the
//! primary sheet; the grand total goes on the final sheet only and always sums
//! the whole order.

use chrono::{DateTime, Utc};

use crate::config::{Config, SenderProfile};
use crate::customs::format::{date_br_short, money_comma, money_point, weight_comma, weight_point};
use crate::customs::{
    DeclarationTotals, LineItem, Money, Page, PageCapacities, PageKind,
};
use crate::documents::html::{div, document, escape, row};
use crate::models::order::OrderRow;

pub const PACKET_TYPE: &str = "Standard";
const PLACEHOLDER_TRACKING: &str = "IX 123 456 789 BR";

#[derive(Debug, Clone)]
pub struct RecipientBlock {
    pub name: String,
    pub address: String,
    pub details: String,
    pub city_state: String,
    pub zip: String,
}

#[derive(Debug, Clone)]
pub struct DeclarationData {
    pub order_number: String,
    pub tracking_id: String,
    pub contract: String,
    pub packet_type: String,
    pub recipient: RecipientBlock,
    pub sender: SenderProfile,
    pub issued_on: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub freight: Money,
    pub insurance: Money,
}

impl DeclarationData {
    pub fn from_order(order: &OrderRow, items: Vec<LineItem>, config: &Config, now: DateTime<Utc>) -> Self {
        let address = order.address();
        DeclarationData {
            order_number: order.order_number(),
            tracking_id: order
                .tracking_id
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_TRACKING.to_string()),
            contract: order
                .contract
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| config.sender.contract_number.clone()),
            packet_type: PACKET_TYPE.to_string(),
            recipient: RecipientBlock {
                name: order.customer_name.clone(),
                address: address.address1.clone().unwrap_or_default(),
                details: address.address2.clone().unwrap_or_default(),
                city_state: address.city_state(),
                zip: address.zip.clone().unwrap_or_default(),
            },
            sender: config.sender.clone(),
            issued_on: now,
            items,
            freight: config.freight,
            insurance: config.insurance,
        }
    }
}

const CSS: &str = r#"
@page { size: 100mm 175mm; margin: 0; }
body { margin: 0; font-family: Arial, sans-serif; font-size: 8pt; }
.sheet { width: 100mm; min-height: 175mm; box-sizing: border-box; padding: 3mm; border: 1px solid #000; page-break-after: always; }
.sheet:last-child { page-break-after: auto; }
.header { display: flex; justify-content: space-between; align-items: center; font-weight: bold; }
.meta { display: flex; justify-content: space-between; margin: 1mm 0; }
.packet { font-size: 11pt; font-weight: bold; }
.barcode-visual { height: 14mm; margin: 1mm 0; background: repeating-linear-gradient(90deg, #000 0, #000 2px, #fff 2px, #fff 4px, #000 4px, #000 5px, #fff 5px, #fff 8px); }
.barcode-text { text-align: center; font-family: 'Courier New', monospace; font-size: 11pt; font-weight: bold; letter-spacing: 2px; }
.receiver { border-top: 1px solid #000; border-bottom: 1px solid #000; padding: 1mm 0; }
.recipient { display: flex; flex-direction: column; padding: 1mm 0; }
.recipient .name { font-weight: bold; }
.zip { font-family: 'Courier New', monospace; font-weight: bold; }
.return { display: flex; gap: 2mm; border: 1px solid #000; padding: 1mm; }
.return > div { flex: 1; display: flex; flex-direction: column; }
.customs-title { display: flex; justify-content: space-between; margin-top: 1mm; font-weight: bold; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #000; padding: 2px; text-align: left; }
th { background-color: #f0f0f0; font-weight: bold; }
.supplementary-header { display: flex; flex-direction: column; align-items: center; font-weight: bold; font-size: 10pt; margin-bottom: 2mm; }
.total-label { font-weight: bold; color: #ff0000; }
.total { font-weight: bold; }
.continued { font-style: italic; text-align: center; }
"#;

const PRIMARY_TABLE_HEAD: &str = "<thead><tr><th>SH / NCM</th><th>Qtde</th><th>Descrição/nome e Conteúdo</th><th>Peso (Kg)</th><th>Unit BRL</th><th>Value BRL</th></tr></thead>";

const SUPPLEMENTARY_TABLE_HEAD: &str = "<thead><tr><th>SH/NCM</th><th>QUANTITY</th><th>DESCRIPTION</th><th>WEIGHT (KG)</th><th>UNIT USD</th><th>VALUE USD</th></tr></thead>";

/// Renders every sheet of the declaration as one printable document.
pub fn render(data: &DeclarationData, capacities: &PageCapacities) -> String {
    let pagination = capacities.paginate(&data.items);
    let totals = DeclarationTotals::compute(&data.items, data.freight, data.insurance);

    let sheets = if pagination.is_empty() {
        // An order without items still prints its primary sheet.
        let empty = Page {
            kind: PageKind::Primary,
            sequence_number: 1,
            items: Vec::new(),
        };
        primary_sheet(data, &empty, 1, Some(&totals))
    } else {
        let page_count = pagination.len();
        pagination
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                let totals = pagination.is_last(idx).then_some(&totals);
                match page.kind {
                    PageKind::Primary => primary_sheet(data, page, page_count, totals),
                    PageKind::Supplementary => supplementary_sheet(data, page, page_count, totals),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    document(
        &format!("Declaração para Alfândega - {}", data.tracking_id),
        CSS,
        &sheets,
    )
}

fn item_rows(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|item| {
            row(&[
                item.customs_code().to_string(),
                item.quantity().to_string(),
                item.description().to_string(),
                weight_point(item.weight()),
                money_point(item.unit_value()),
                money_point(item.total_value()),
            ])
        })
        .collect()
}

fn charges_rows(freight: Money, insurance: Money) -> String {
    format!(
        "<tr><td colspan=\"5\">Frete BRL</td><td>{}</td></tr><tr><td colspan=\"5\">Seguro BRL</td><td>{}</td></tr>",
        money_comma(freight),
        money_comma(insurance)
    )
}

fn total_row(totals: &DeclarationTotals) -> String {
    format!(
        "<tr><td colspan=\"3\" class=\"total-label\">TOTAL (BRL) - (Mercadorias + Frete + Seguro)</td>\
         <td class=\"total\">{}</td><td></td><td class=\"total\">{}</td></tr>",
        weight_comma(totals.total_weight),
        money_comma(totals.declared_value)
    )
}

fn continued_row(next_sheet: u32) -> String {
    format!(
        "<tr><td colspan=\"6\" class=\"continued\">Continua na folha {next_sheet} / Continued on sheet {next_sheet}</td></tr>"
    )
}

fn primary_sheet(
    data: &DeclarationData,
    page: &Page,
    page_count: usize,
    totals: Option<&DeclarationTotals>,
) -> String {
    let r = &data.recipient;
    let s = &data.sender;
    let mut tail = charges_rows(data.freight, data.insurance);
    tail.push_str(&match totals {
        Some(t) => total_row(t),
        None => continued_row(page.sequence_number + 1),
    });

    format!(
        r#"<div class="sheet primary">
<div class="header"><div>{store}</div><div>CORREIOS</div><div>PACKET {packet_upper}</div></div>
<div class="meta"><span>Order #: {order}</span><span>PRC Remessa Conforme</span></div>
<div class="meta"><span class="packet">PACKET {packet_upper}</span><span>Contrato {contract}</span></div>
<div class="barcode-visual"></div>
{tracking}
<div class="receiver"><div>Recebedor: ___________________________________________</div><div>Assinatura: _________________________ Doc: ______________</div></div>
<div class="recipient"><span class="name">{r_name}</span><span>{r_addr}</span><span>{r_details}</span><span>{r_city}</span><span class="zip">{r_zip}</span></div>
<div><strong>Instrução do Remetente no caso de não nacionalização:</strong></div>
<div class="return">
<div><span>[X] Retorno à origem</span><span>Dúvidas e reclamações via correios.com.br - e-mail / site</span><strong>DEVOLUÇÃO:</strong><span>(Em caso de não ser possível entregar para):</span><span>{s_dom}</span><span>{s_addr}</span><span>{s_cep}</span></div>
<div><strong>Remetente:</strong><span>{s_abroad}</span><span>{s_city}</span><span>{s_country}</span><span>{s_site}</span></div>
</div>
<div class="customs-title"><span>Declaração para Alfândega</span><span>Pode ser aberto Ex Offício {seq}/{count}</span><span>{date}</span></div>
<table>{head}<tbody>{rows}{tail}</tbody></table>
</div>"#,
        store = escape(&s.name_abroad),
        packet_upper = escape(&data.packet_type.to_uppercase()),
        order = escape(&data.order_number),
        contract = escape(&data.contract),
        tracking = div("barcode-text", &data.tracking_id),
        r_name = escape(&r.name),
        r_addr = escape(&r.address),
        r_details = escape(&r.details),
        r_city = escape(&r.city_state),
        r_zip = escape(&r.zip),
        s_dom = escape(&s.name_domestic),
        s_addr = escape(&s.address_domestic),
        s_cep = escape(&s.postal_line_domestic),
        s_abroad = escape(&s.name_abroad),
        s_city = escape(&s.city),
        s_country = escape(&s.country_of_origin),
        s_site = escape(&s.sales_site),
        seq = page.sequence_number,
        count = page_count,
        date = escape(&date_br_short(&data.issued_on)),
        head = PRIMARY_TABLE_HEAD,
        rows = item_rows(&page.items),
        tail = tail,
    )
}

fn supplementary_sheet(
    data: &DeclarationData,
    page: &Page,
    page_count: usize,
    totals: Option<&DeclarationTotals>,
) -> String {
    let tail = match totals {
        Some(t) => total_row(t),
        None => continued_row(page.sequence_number + 1),
    };

    format!(
        r#"<div class="sheet supplementary">
<div class="supplementary-header"><span>SUPPLEMENTARY</span><span>CUSTOMS DECLARATION</span><span>{tracking}</span><span>{seq}/{count}</span></div>
<table>{head}<tbody>{rows}{tail}</tbody></table>
</div>"#,
        tracking = escape(&data.tracking_id),
        seq = page.sequence_number,
        count = page_count,
        head = SUPPLEMENTARY_TABLE_HEAD,
        rows = item_rows(&page.items),
        tail = tail,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customs::Weight;
    use chrono::TimeZone;

    fn items(n: usize) -> Vec<LineItem> {
        (0..n)
            .map(|i| {
                LineItem::new(
                    "331090",
                    1,
                    format!("Perfume #{i}"),
                    Weight::from_grams(500).unwrap(),
                    Money::from_cents(1000).unwrap(),
                )
                .unwrap()
            })
            .collect()
    }

    fn data(n: usize) -> DeclarationData {
        let config = Config::for_tests();
        DeclarationData {
            order_number: "1001".to_string(),
            tracking_id: "NX 000 111 222 BR".to_string(),
            contract: "9912".to_string(),
            packet_type: PACKET_TYPE.to_string(),
            recipient: RecipientBlock {
                name: "Maria <Silva>".to_string(),
                address: "Rua das Flores, 10".to_string(),
                details: "Apto 2".to_string(),
                city_state: "Niterói/RJ".to_string(),
                zip: "24000-000".to_string(),
            },
            sender: config.sender.clone(),
            issued_on: Utc.with_ymd_and_hms(2025, 12, 23, 10, 0, 0).unwrap(),
            items: items(n),
            freight: config.freight,
            insurance: config.insurance,
        }
    }

    fn caps() -> PageCapacities {
        PageCapacities::new(3, 20).unwrap()
    }

    #[test]
    fn test_single_sheet_carries_totals() {
        let html = render(&data(2), &caps());
        assert_eq!(html.matches("class=\"sheet ").count(), 1);
        assert_eq!(html.matches("TOTAL (BRL)").count(), 1);
        // 2 × 10.00 + 20.00 + 20.00
        assert!(html.contains(">60,00<"));
        assert!(html.contains(">1,00<"));
        assert!(html.contains("Ex Offício 1/1"));
    }

    #[test]
    fn test_totals_only_on_last_sheet() {
        let html = render(&data(24), &caps());
        assert_eq!(html.matches("class=\"sheet supplementary\"").count(), 2);
        assert_eq!(html.matches("TOTAL (BRL)").count(), 1);
        assert_eq!(html.matches("class=\"continued\"").count(), 2);
        let total_pos = html.find("TOTAL (BRL)").unwrap();
        let last_sheet = html.rfind("class=\"sheet supplementary\"").unwrap();
        assert!(total_pos > last_sheet);
        // 24 × 10.00 + 40.00, weight 24 × 0.5
        assert!(html.contains(">280,00<"));
        assert!(html.contains(">12,00<"));
    }

    #[test]
    fn test_primary_sheet_has_brl_header() {
        let html = render(&data(10), &caps());
        let first_supplementary = html.find("class=\"sheet supplementary\"").unwrap();
        let (primary, supplementary) = html.split_at(first_supplementary);
        assert!(primary.contains("<th>Unit BRL</th><th>Value BRL</th>"));
        assert!(!primary.contains("UNIT USD"));
        assert!(supplementary.contains("<th>UNIT USD</th><th>VALUE USD</th>"));
        assert!(!supplementary.contains("Unit BRL"));
    }

    #[test]
    fn test_charges_stay_on_primary_sheet() {
        let html = render(&data(10), &caps());
        assert_eq!(html.matches("Frete BRL").count(), 1);
        assert_eq!(html.matches("Seguro BRL").count(), 1);
        let charges = html.find("Frete BRL").unwrap();
        let first_supplementary = html.find("class=\"sheet supplementary\"").unwrap();
        assert!(charges < first_supplementary);
    }

    #[test]
    fn test_every_item_rendered_once() {
        let html = render(&data(43), &caps());
        for i in 0..43 {
            assert_eq!(html.matches(&format!(">Perfume #{i}<")).count(), 1, "item {i}");
        }
        assert_eq!(html.matches("CUSTOMS DECLARATION").count(), 2);
    }

    #[test]
    fn test_empty_order_still_prints_primary_sheet() {
        let html = render(&data(0), &caps());
        assert_eq!(html.matches("class=\"sheet primary\"").count(), 1);
        assert!(html.contains("TOTAL (BRL)"));
        assert!(html.contains(">40,00<"));
    }

    #[test]
    fn test_recipient_is_escaped() {
        let html = render(&data(1), &caps());
        assert!(html.contains("Maria &lt;Silva&gt;"));
        assert!(!html.contains("Maria <Silva>"));
    }
}

//! CN38 airline delivery bill. Almost every field is operator-entered at
//! dispatch time, so the renderer takes a form record rather than order data.

use chrono::Utc;
use serde::Deserialize;

use crate::customs::format::date_br;
use crate::documents::html::{document, escape, row};

pub const DISPATCH_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMode {
    #[default]
    Standard,
    Express,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum PaymentType {
    #[default]
    #[serde(rename = "DDU")]
    Ddu,
    #[serde(rename = "DRC")]
    Drc,
    #[serde(rename = "tributo")]
    TributoAntecipado,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DispatchRow {
    pub dispatch_number: String,
    pub serial_number: String,
    pub weight: String,
    pub seal_number: String,
    pub observations: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Cn38Form {
    /// Sheet counter, e.g. `"1 DE 1"`.
    pub e_of_e: String,
    pub office_of_origin: String,
    pub origin_n: String,
    pub airline: String,
    pub date: String,
    pub departure_date: String,
    pub delivery_bill_number: String,
    pub contract_number: String,
    pub flight_number: String,
    pub time: String,
    pub service_mode: ServiceMode,
    pub payment_type: PaymentType,
    pub departure_airport: String,
    pub transit_airport: String,
    pub arrival_airport: String,
    pub dispatch_rows: Vec<DispatchRow>,
    pub subtotal: String,
    pub total: String,
}

impl Default for Cn38Form {
    fn default() -> Self {
        let today = date_br(&Utc::now());
        Cn38Form {
            e_of_e: "1 DE 1".to_string(),
            office_of_origin: String::new(),
            origin_n: String::new(),
            airline: String::new(),
            date: today.clone(),
            departure_date: today,
            delivery_bill_number: String::new(),
            contract_number: String::new(),
            flight_number: String::new(),
            time: String::new(),
            service_mode: ServiceMode::default(),
            payment_type: PaymentType::default(),
            departure_airport: String::new(),
            transit_airport: String::new(),
            arrival_airport: String::new(),
            dispatch_rows: vec![DispatchRow::default(); DISPATCH_ROWS],
            subtotal: String::new(),
            total: String::new(),
        }
    }
}

impl Cn38Form {
    /// Dispatch rows padded (or truncated) to the fixed grid of the paper form.
    pub fn grid_rows(&self) -> Vec<DispatchRow> {
        let mut rows: Vec<DispatchRow> = self.dispatch_rows.iter().take(DISPATCH_ROWS).cloned().collect();
        rows.resize(DISPATCH_ROWS, DispatchRow::default());
        rows
    }
}

const CSS: &str = r#"
@page { size: A4; margin: 10mm; }
body { margin: 0; font-family: Arial, sans-serif; font-size: 8pt; }
.cn38 { width: 190mm; border: 2px solid #000; padding: 3mm; box-sizing: border-box; }
.top { display: flex; justify-content: space-between; align-items: center; border-bottom: 2px solid #000; padding-bottom: 2mm; }
.title { font-size: 14pt; font-weight: bold; text-align: center; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 0; }
.cell { border: 1px solid #000; padding: 1mm; min-height: 9mm; }
.cell-label { font-weight: bold; font-size: 7pt; }
.cell-label i { font-weight: normal; }
.cell-value { font-size: 10pt; }
.options span { margin-right: 4mm; }
table { width: 100%; border-collapse: collapse; margin-top: 2mm; }
th, td { border: 1px solid #000; padding: 1mm; height: 7mm; text-align: center; }
.signatures { display: flex; gap: 4mm; margin-top: 3mm; }
.signatures > div { flex: 1; border: 1px solid #000; height: 20mm; padding: 1mm; }
"#;

fn cell(pt: &str, en: &str, value: &str) -> String {
    format!(
        "<div class=\"cell\"><div class=\"cell-label\">{} <i>({})</i></div><div class=\"cell-value\">{}</div></div>",
        escape(pt),
        escape(en),
        escape(value)
    )
}

fn mark(checked: bool) -> &'static str {
    if checked {
        "[X]"
    } else {
        "[ ]"
    }
}

pub fn render(form: &Cn38Form) -> String {
    let dispatch: String = form
        .grid_rows()
        .iter()
        .map(|r| {
            row(&[
                r.dispatch_number.as_str(),
                r.serial_number.as_str(),
                r.weight.as_str(),
                r.seal_number.as_str(),
                r.observations.as_str(),
            ])
        })
        .collect();

    let service = format!(
        "<div class=\"cell options\"><div class=\"cell-label\">MODALIDADE DE SERVIÇO <i>(Service mode no.)</i></div><span>{} Packet Standard</span><span>{} Packet Express</span></div>",
        mark(form.service_mode == ServiceMode::Standard),
        mark(form.service_mode == ServiceMode::Express),
    );
    let payment = format!(
        "<div class=\"cell options\"><div class=\"cell-label\">TRANSPORTADOR</div><span>{} DDU</span><span>{} DRC</span><span>{} Tributo Antecipado</span></div>",
        mark(form.payment_type == PaymentType::Ddu),
        mark(form.payment_type == PaymentType::Drc),
        mark(form.payment_type == PaymentType::TributoAntecipado),
    );

    let body = format!(
        r#"<div class="cn38">
<div class="top"><div>Logo da Empresa</div><div class="title">FATURA DE ENTREGA<br><i>(Delivery Bill)</i> CN 38</div><div>{e_of_e}</div></div>
<div class="grid">
{origin}{bill}
{origin_n}{contract}
{airline}{flight}
{date}{time}
{departure_date}{service}
<div class="cell"></div>{payment}
</div>
<div class="grid">
{dep_airport}{transit}
{arrival}<div class="cell"></div>
</div>
<div class="cell-label">DADOS DO DESPACHO <i>(Dispatch Data)</i></div>
<table><thead><tr><th>Nº DO DESPACHO<br><i>(Dispatch #)</i></th><th>Nº SERIAL DE MALA<br><i>(Receptacle Serial #)</i></th><th>PESO BRUTO DA MALA Kg<br><i>(Gross Weight of Bags Kg)</i></th><th>Nº DO LACRE DA MALA<br><i>(Bag Seal #)</i></th><th>OBSERVAÇÕES<br><i>(Observations)</i></th></tr></thead>
<tbody>{dispatch}<tr><td colspan="2">SUBTOTAL</td><td>{subtotal}</td><td colspan="2"></td></tr><tr><td colspan="2">TOTAL</td><td>{total}</td><td colspan="2"></td></tr></tbody></table>
<div class="signatures">
<div><div class="cell-label">OPERADOR DE ORIGEM <i>(Dispatching Office of Exchange)</i></div><div>Assinatura / Signature</div></div>
<div><div class="cell-label">ASSINATURA DOS OPERADORES <i>(The Official of the Carrier or Airport)</i></div><div>(Signature)</div></div>
<div><div class="cell-label">OPERADOR DE DESTINO <i>(Office of Exchange of destination)</i></div><div>Assinatura / Signature</div></div>
</div>
</div>"#,
        e_of_e = escape(&form.e_of_e),
        origin = cell("OPERADOR DE ORIGEM", "Office of Origin", &form.office_of_origin),
        bill = cell("Nº FATURA DE ENTREGA", "Delivery Bill #", &form.delivery_bill_number),
        origin_n = cell("Nº", "Origin", &form.origin_n),
        contract = cell("Nº DO CONTRATO", "Contract Number", &form.contract_number),
        airline = cell("CIA AÉREA", "Airline", &form.airline),
        flight = cell("Nº VOO", "Flight #", &form.flight_number),
        date = cell("DATA", "Date", &form.date),
        time = cell("HORA", "Time", &form.time),
        departure_date = cell("DATA DE PARTIDA", "Date of Departure", &form.departure_date),
        service = service,
        payment = payment,
        dep_airport = cell("AEROPORTO DE PARTIDA", "Airport of departure", &form.departure_airport),
        transit = cell("AEROPORTO DE TRANSBORDO", "Airport of transshipment", &form.transit_airport),
        arrival = cell("AEROPORTO DE CHEGADA", "Airport of Offloading", &form.arrival_airport),
        dispatch = dispatch,
        subtotal = escape(&form.subtotal),
        total = escape(&form.total),
    );

    document("CN38 - Fatura de Entrega", CSS, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_blank_form() {
        let form = Cn38Form::default();
        assert_eq!(form.e_of_e, "1 DE 1");
        assert_eq!(form.dispatch_rows.len(), DISPATCH_ROWS);
        assert_eq!(form.service_mode, ServiceMode::Standard);
        assert_eq!(form.payment_type, PaymentType::Ddu);
        assert_eq!(form.date.len(), 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let form: Cn38Form = serde_json::from_value(serde_json::json!({
            "airline": "LATAM",
            "service_mode": "express",
            "payment_type": "tributo",
            "dispatch_rows": [{ "dispatch_number": "D-1", "weight": "12.5" }]
        }))
        .unwrap();
        assert_eq!(form.airline, "LATAM");
        assert_eq!(form.e_of_e, "1 DE 1");
        assert_eq!(form.payment_type, PaymentType::TributoAntecipado);
        assert_eq!(form.grid_rows().len(), DISPATCH_ROWS);
        assert_eq!(form.grid_rows()[0].dispatch_number, "D-1");
    }

    #[test]
    fn test_render_marks_selected_options_and_rows() {
        let form = Cn38Form {
            service_mode: ServiceMode::Express,
            flight_number: "LA8084".to_string(),
            ..Default::default()
        };
        let html = render(&form);
        assert!(html.contains("[ ] Packet Standard"));
        assert!(html.contains("[X] Packet Express"));
        assert!(html.contains("[X] DDU"));
        assert!(html.contains(">LA8084<"));
        assert_eq!(html.matches("<tr><td>").count(), DISPATCH_ROWS);
    }
}

use crate::config::SenderProfile;
use crate::documents::html::{div, document, escape, escape_lines};
use crate::models::order::OrderRow;

#[derive(Debug, Clone)]
pub struct LabelAddress {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct ShippingLabelData {
    pub tracking_number: String,
    pub cn35_number: String,
    pub sender_name: String,
    pub sender_country: String,
    pub recipient_name: String,
    pub recipient_address: LabelAddress,
}

impl ShippingLabelData {
    pub fn from_order(order: &OrderRow, sender: &SenderProfile) -> Self {
        let a = order.address();
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        ShippingLabelData {
            tracking_number: order.tracking_id.clone().unwrap_or_default(),
            cn35_number: order.order_number(),
            sender_name: sender.name_abroad.clone(),
            sender_country: sender.country_of_origin.clone(),
            recipient_name: order.customer_name.clone(),
            recipient_address: LabelAddress {
                street: text(&a.address1),
                number: text(&a.number),
                complement: a.address2.clone(),
                district: a.district.clone(),
                city: text(&a.city),
                state: a
                    .province_code
                    .clone()
                    .or_else(|| a.province.clone())
                    .unwrap_or_default(),
                postal_code: text(&a.zip),
                country: text(&a.country),
            },
        }
    }
}

impl LabelAddress {
    /// One line per present part; blank optional parts are dropped.
    pub fn lines(&self) -> Vec<String> {
        let street = if self.number.is_empty() {
            self.street.clone()
        } else {
            format!("{}, {}", self.street, self.number)
        };
        [
            Some(street),
            self.complement.clone(),
            self.district.clone(),
            Some(format!("{} - {}", self.city, self.state)),
            Some(self.postal_code.clone()),
            Some(self.country.clone()),
        ]
        .into_iter()
        .flatten()
        .filter(|line| !line.trim().is_empty())
        .collect()
    }
}

const CSS: &str = r#"
@page { size: 10cm 15cm; margin: 0; }
body { margin: 0; padding: 0.5cm; font-family: Arial, sans-serif; font-size: 10pt; line-height: 1.3; width: 10cm; height: 15cm; box-sizing: border-box; }
.label { display: flex; flex-direction: column; height: 100%; }
.section { margin-bottom: 0.3cm; }
.barcode { text-align: center; margin: 0.3cm 0; }
.barcode-text { font-family: 'Courier New', monospace; font-size: 14pt; font-weight: bold; letter-spacing: 2px; margin-top: 0.2cm; }
.barcode-visual { height: 1.2cm; margin: 0.2cm 0; background: repeating-linear-gradient(90deg, #000 0, #000 8%, #fff 8%, #fff 10%, #000 10%, #000 12%, #fff 12%, #fff 16%); }
.label-title { font-size: 8pt; font-weight: bold; color: #666; text-transform: uppercase; margin-bottom: 0.1cm; }
.label-value { font-size: 11pt; font-weight: bold; }
.from-to { border: 2px solid #000; padding: 0.3cm; margin-bottom: 0.3cm; }
.to-section { flex: 1; border: 2px solid #000; padding: 0.3cm; }
"#;

/// 10×15 cm shipping label.
pub fn render(data: &ShippingLabelData) -> String {
    let address = escape_lines(&data.recipient_address.lines().join("\n"));
    let body = format!(
        r#"<div class="label">
<div class="barcode"><div class="barcode-visual"></div>{tracking}</div>
<div class="section"><div class="label-title">CN35</div>{cn35}</div>
<div class="from-to"><div class="label-title">From</div>{sender}<div>{sender_country}</div></div>
<div class="to-section"><div class="label-title">To</div>{recipient}<div class="address-line">{address}</div></div>
</div>"#,
        tracking = div("barcode-text", &data.tracking_number),
        cn35 = div("label-value", &data.cn35_number),
        sender = div("label-value", &data.sender_name),
        sender_country = escape(&data.sender_country),
        recipient = div("label-value", &data.recipient_name),
        address = address,
    );
    document(
        &format!("Etiqueta de Envio - {}", data.tracking_number),
        CSS,
        &body,
    )
}

use serde::{Deserialize, Serialize};

/// Version tag of the GOST R 56042-2014 payment payload format.
pub const FORMAT_TAG: &str = "ST00011";

/// Fixed payee banking requisites.
///
/// Constructed once at startup and injected by value wherever the encoder
/// needs them. These identify the payee organization and never vary per
/// request; `Default` carries the production deployment values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisites {
    pub name: String,
    pub personal_acc: String,
    pub bank_name: String,
    pub bic: String,
    pub corresp_acc: String,
    pub payee_inn: String,
    pub kpp: String,
}

impl Default for Requisites {
    fn default() -> Self {
        Self {
            name: r#"ООО "ЭНЕРДЖИ МЕНЕДЖМЕНТ""#.to_string(),
            personal_acc: "40702810900000057455".to_string(),
            bank_name: "Банк ГПБ (АО) г. Москва".to_string(),
            bic: "044525823".to_string(),
            corresp_acc: "30101810200000000823".to_string(),
            payee_inn: "9709082458".to_string(),
            kpp: "770401001".to_string(),
        }
    }
}

impl Requisites {
    /// Builds the pipe-delimited payload consumed by QR tooling.
    ///
    /// Field order is fixed: the version tag, the seven requisites, then
    /// `Purpose`, `LastName` and `SUM` (kopecks) last. The format defines no
    /// escaping for `|` or `=`, so values pass through verbatim.
    pub fn encode_payload(&self, purpose: &str, payer_name: &str, kopecks: i64) -> String {
        [
            FORMAT_TAG.to_string(),
            format!("Name={}", self.name),
            format!("PersonalAcc={}", self.personal_acc),
            format!("BankName={}", self.bank_name),
            format!("BIC={}", self.bic),
            format!("CorrespAcc={}", self.corresp_acc),
            format!("PayeeINN={}", self.payee_inn),
            format!("KPP={}", self.kpp),
            format!("Purpose={}", purpose),
            format!("LastName={}", payer_name),
            format!("SUM={}", kopecks),
        ]
        .join("|")
    }
}

use serde::{Deserialize, Serialize};

use crate::models::register::Register;

/// Response of `GET /ttfs/1.0.0/financialPeriods`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPeriods {
    pub business_id: String,
    pub register: Register,
    pub company_name: String,
    #[serde(alias = "periods", default)]
    pub financial_periods: Vec<FinancialPeriod>,
}

/// Dates are `YYYY-MM-DD` strings as sent by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPeriod {
    pub start_date: String,
    pub end_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_registry_payload() {
        let value = json!({
            "businessId": "1234567-8",
            "register": "krek",
            "companyName": "Acme",
            "financialPeriods": [
                {"startDate": "2019-01-01", "endDate": "2019-12-31"},
                {"startDate": "2020-01-01", "endDate": "2020-12-31"}
            ]
        });
        let periods: FinancialPeriods = serde_json::from_value(value).unwrap();
        assert_eq!(periods.register, Register::Krek);
        assert_eq!(periods.financial_periods.len(), 2);
        assert_eq!(periods.financial_periods[1].start_date, "2020-01-01");
    }

    #[test]
    fn accepts_periods_alias() {
        let value = json!({
            "businessId": "1234567-8",
            "register": "srek",
            "companyName": "Säätiö",
            "periods": [{"startDate": "2021-01-01", "endDate": "2021-12-31"}]
        });
        let periods: FinancialPeriods = serde_json::from_value(value).unwrap();
        assert_eq!(periods.financial_periods.len(), 1);
    }
}

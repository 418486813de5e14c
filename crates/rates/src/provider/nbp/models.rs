use serde::Deserialize;

/// Table C response from the NBP exchange rate API.
///
/// `GET /api/exchangerates/rates/c/{code}/?format=json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NbpRatesResponse {
    #[allow(dead_code)]
    pub table: Option<String>,
    #[allow(dead_code)]
    pub code: Option<String>,
    pub rates: Vec<NbpRateEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NbpRateEntry {
    #[allow(dead_code)]
    pub no: Option<String>,
    pub effective_date: Option<String>,
    /// Kept as a JSON number so the decimal is parsed from its shortest text form.
    pub bid: serde_json::Number,
    pub ask: serde_json::Number,
}

//! Session login, slip queries and purchase slip creation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::EcountConfig;
use crate::error::EcountError;
use crate::transport::{HttpReply, ReqwestTransport, Transport};

pub const LOGIN_PATH: &str = "/OAPI/V2/OAPILogin";
pub const SALES_SLIPS_PATH: &str = "/OAPI/V2/Sale/GetListSaleSlipAll";
pub const PURCHASE_SLIPS_PATH: &str = "/OAPI/V2/Sale/GetListPurchaseSlipAll";
pub const PAYROLL_PATH: &str = "/OAPI/V2/HRSalary/GetListSalarySlip";
pub const SAVE_PURCHASES_PATH: &str = "/OAPI/V2/Purchases/SavePurchases";

const LOGIN: &str = "Login";
const API_CALL: &str = "API call";
const PURCHASE_SLIP: &str = "Purchase slip creation";

/// Authenticated session returned by [`EcountClient::login`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub zone: String,
}

/// Slip list envelope. Fields the client does not interpret are kept in
/// `extra` so the response can be printed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlipResponse {
    #[serde(rename = "Status", default)]
    pub status: Value,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(rename = "Data", default)]
    pub data: Option<SlipData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlipData {
    #[serde(rename = "Datas", default)]
    pub datas: Vec<Value>,
    #[serde(rename = "TotalCount", default)]
    pub total_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SlipResponse {
    /// Slip rows, empty when `Data` was null.
    pub fn slips(&self) -> &[Value] {
        self.data.as_ref().map(|d| d.datas.as_slice()).unwrap_or_default()
    }
}

/// `Status`/`Error` pair every Ecount response starts with.
#[derive(Debug, Deserialize)]
struct Envelope<D> {
    #[serde(rename = "Status", default)]
    status: Value,
    #[serde(rename = "Error", default)]
    error: Value,
    #[serde(rename = "Data")]
    data: Option<D>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(rename = "Datas")]
    datas: LoginDatas,
}

#[derive(Debug, Deserialize)]
struct LoginDatas {
    #[serde(rename = "SESSION_ID")]
    session_id: String,
    #[serde(rename = "ZONE", default)]
    zone: Option<String>,
}

fn status_text(status: &Value) -> String {
    match status {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_ok_status(status: &Value) -> bool {
    matches!(status_text(status).as_str(), "200" | "200 OK")
}

/// The `Error` field when it says something, else the status itself.
fn api_message(error: &Value, status: &Value) -> String {
    match error {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Object(obj) => obj
            .get("Message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        _ => status_text(status),
    }
}

fn check_http(context: &'static str, reply: &HttpReply) -> Result<(), EcountError> {
    if reply.is_success() {
        Ok(())
    } else {
        Err(EcountError::Http {
            context,
            status: reply.status,
            reason: reply.reason.clone(),
        })
    }
}

fn decode<T: for<'de> Deserialize<'de>>(context: &'static str, body: &str) -> Result<T, EcountError> {
    serde_json::from_str(body).map_err(|e| EcountError::Malformed {
        context,
        detail: e.to_string(),
    })
}

/// Strip the dashes from an ISO date, as the API expects `YYYYMMDD`.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Payroll period, parsed from `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid month '{s}' (expected YYYY-MM)");
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One line of a purchase slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseItem {
    pub description: String,
    /// Supply value, VAT excluded.
    pub amount: i64,
    pub vat_amount: i64,
    pub account_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseSlipRequest {
    pub slip_date: NaiveDate,
    pub vendor_name: String,
    pub items: Vec<PurchaseItem>,
    pub card_company_code: Option<String>,
    pub card_number: Option<String>,
    pub approval_number: Option<String>,
    pub approval_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct BulkDatas<'a> {
    io_date: String,
    cust_nm: &'a str,
    prod_des: &'a str,
    amt: String,
    vat_amt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    acct_cd: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_cd: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_no: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    appr_no: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    appr_date: Option<String>,
}

impl PurchaseSlipRequest {
    /// `{"PurchasesList": [{"BulkDatas": {...}}, ...]}`, one entry per item.
    /// Amounts are sent as strings.
    pub fn to_body(&self) -> Value {
        let list: Vec<Value> = self
            .items
            .iter()
            .map(|item| {
                let bulk = BulkDatas {
                    io_date: compact_date(self.slip_date),
                    cust_nm: &self.vendor_name,
                    prod_des: &item.description,
                    amt: item.amount.to_string(),
                    vat_amt: item.vat_amount.to_string(),
                    acct_cd: item.account_code.as_deref(),
                    card_cd: self.card_company_code.as_deref(),
                    card_no: self.card_number.as_deref(),
                    appr_no: self.approval_number.as_deref(),
                    appr_date: self.approval_date.map(compact_date),
                };
                json!({ "BulkDatas": bulk })
            })
            .collect();
        json!({ "PurchasesList": list })
    }
}

/// Ecount Open API client over a [`Transport`].
pub struct EcountClient<T = ReqwestTransport> {
    config: EcountConfig,
    transport: T,
}

impl EcountClient<ReqwestTransport> {
    pub fn new(config: EcountConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> EcountClient<T> {
    pub fn with_transport(config: EcountConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &EcountConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn login(&self) -> Result<Session, EcountError> {
        let url = format!("{}{}", self.config.base_url_for(&self.config.zone), LOGIN_PATH);
        let body = json!({
            "COM_CODE": self.config.com_code,
            "USER_ID": self.config.user_id,
            "API_CERT_KEY": self.config.api_cert_key,
            "LAN_TYPE": "ko-KR",
        });

        info!(endpoint = LOGIN_PATH, zone = %self.config.zone, "ecount login");
        let reply = self.transport.post_json(&url, &[], &body).await?;
        check_http(LOGIN, &reply)?;

        let envelope: Envelope<LoginData> = decode(LOGIN, &reply.body)?;
        if !is_ok_status(&envelope.status) {
            return Err(EcountError::Api {
                context: LOGIN,
                message: api_message(&envelope.error, &envelope.status),
            });
        }

        let datas = envelope
            .data
            .map(|d| d.datas)
            .ok_or_else(|| EcountError::Malformed {
                context: LOGIN,
                detail: "missing Data.Datas".to_string(),
            })?;

        Ok(Session {
            session_id: datas.session_id,
            zone: datas
                .zone
                .filter(|z| !z.is_empty())
                .unwrap_or_else(|| self.config.zone.clone()),
        })
    }

    async fn authenticated_post(
        &self,
        session: &Session,
        endpoint: &str,
        body: Value,
    ) -> Result<SlipResponse, EcountError> {
        let url = format!("{}{}", self.config.base_url_for(&session.zone), endpoint);

        info!(endpoint, "ecount request");
        let reply = self
            .transport
            .post_json(&url, &[("SESSION_ID", session.session_id.as_str())], &body)
            .await?;
        check_http(API_CALL, &reply)?;

        let resp: SlipResponse = decode(API_CALL, &reply.body)?;
        debug!(endpoint, rows = resp.slips().len(), "ecount response");
        Ok(resp)
    }

    fn date_range(from: NaiveDate, to: NaiveDate) -> Value {
        json!({
            "BASE_DATE_FROM": compact_date(from),
            "BASE_DATE_TO": compact_date(to),
        })
    }

    pub async fn get_sales_slips(
        &self,
        session: &Session,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<SlipResponse, EcountError> {
        self.authenticated_post(session, SALES_SLIPS_PATH, Self::date_range(from, to))
            .await
    }

    pub async fn get_purchase_slips(
        &self,
        session: &Session,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<SlipResponse, EcountError> {
        self.authenticated_post(session, PURCHASE_SLIPS_PATH, Self::date_range(from, to))
            .await
    }

    pub async fn get_payroll(
        &self,
        session: &Session,
        period: YearMonth,
    ) -> Result<SlipResponse, EcountError> {
        let body = json!({
            "YEAR": format!("{:04}", period.year),
            "MONTH": format!("{:02}", period.month),
        });
        self.authenticated_post(session, PAYROLL_PATH, body).await
    }

    /// Save a purchase slip. The session travels in the query string for this
    /// endpoint.
    pub async fn create_purchase_slip(
        &self,
        session: &Session,
        request: &PurchaseSlipRequest,
    ) -> Result<Value, EcountError> {
        let url = format!(
            "{}{}?SESSION_ID={}",
            self.config.base_url_for(&session.zone),
            SAVE_PURCHASES_PATH,
            session.session_id
        );

        info!(endpoint = SAVE_PURCHASES_PATH, items = request.items.len(), "ecount request");
        let reply = self.transport.post_json(&url, &[], &request.to_body()).await?;
        check_http(PURCHASE_SLIP, &reply)?;

        let envelope: Envelope<Value> = decode(PURCHASE_SLIP, &reply.body)?;
        if !is_ok_status(&envelope.status) {
            return Err(EcountError::Api {
                context: PURCHASE_SLIP,
                message: api_message(&envelope.error, &envelope.status),
            });
        }
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

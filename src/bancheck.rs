//! Klient zewnętrznego API `GET {base}/check_ban/{uid}`.
//!
//! Jeden współdzielony `reqwest::Client` (pula połączeń) na cały proces.
//! Bez retry, bez cache, domyślne timeouty biblioteki.

use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value as Json;
use tracing::{debug, warn};
use url::Url;

/// Wynik sprawdzenia konta, z wartościami domyślnymi w miejscu brakujących pól.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRecord {
    pub is_banned: bool,
    pub nickname: String,
    pub period: String,
    pub region: String,
}

/// Rozróżnienie wewnętrzne; użytkownik widzi i tak jeden komunikat „spróbuj później”.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(BanRecord),
    /// HTTP 200, ale `status` w payloadzie != 200.
    NotFound { status: Option<i64> },
    Unavailable(Unavailable),
}

#[derive(Debug, thiserror::Error)]
pub enum Unavailable {
    #[error("upstream returned HTTP {0}")]
    HttpStatus(u16),
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed body: {0}")]
    MalformedBody(String),
}

impl LookupOutcome {
    /// Zwija wszystkie porażki do `None`.
    pub fn into_record(self) -> Option<BanRecord> {
        match self {
            LookupOutcome::Found(rec) => Some(rec),
            LookupOutcome::NotFound { .. } | LookupOutcome::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BanApi {
    http: Client,
    base_url: String,
}

impl BanApi {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/check_ban/{uid}` – działa też z bazą zawierającą ścieżkę lub końcowy `/`.
    pub fn endpoint(&self, uid: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("ban API base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .push("check_ban")
            .push(uid);
        Ok(url)
    }

    /// Jedno zapytanie. `Err` tylko gdy nie da się zbudować requestu
    /// (zła konfiguracja); wszystkie błędy sieci/upstreamu → `Unavailable`.
    /// UID waliduje wołający.
    pub async fn lookup(&self, uid: &str) -> Result<LookupOutcome> {
        let url = self.endpoint(uid)?;

        let resp = match self.http.get(url).send().await {
            Ok(r) => r,
            Err(e) => return Ok(unavailable(uid, Unavailable::Transport(e))),
        };

        let status = resp.status();
        if status != StatusCode::OK {
            return Ok(unavailable(uid, Unavailable::HttpStatus(status.as_u16())));
        }

        let body = match resp.bytes().await {
            Ok(b) => b,
            Err(e) => return Ok(unavailable(uid, Unavailable::Transport(e))),
        };

        let outcome = match parse_body(&body) {
            Ok(o) => o,
            Err(reason) => unavailable(uid, Unavailable::MalformedBody(reason)),
        };
        if let LookupOutcome::NotFound { status } = &outcome {
            debug!(uid, ?status, "ban API: payload status != 200");
        }
        Ok(outcome)
    }

    /// Kontrakt „rekord albo nic”.
    pub async fn check_ban(&self, uid: &str) -> Result<Option<BanRecord>> {
        Ok(self.lookup(uid).await?.into_record())
    }
}

fn unavailable(uid: &str, reason: Unavailable) -> LookupOutcome {
    warn!(uid, error=%reason, "ban API unavailable");
    LookupOutcome::Unavailable(reason)
}

/// Parsuje payload `{status, data:{is_banned, nickname, period, region}}`.
pub fn parse_body(body: &[u8]) -> std::result::Result<LookupOutcome, String> {
    let root: Json = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    // tylko obiekt; tablica czy liczba to zły kształt, nie „czyste konto”
    let Json::Object(env) = &root else {
        return Err(format!("payload is not an object: {root}"));
    };

    let status = env.get("status").and_then(whole);
    if status != Some(200) {
        return Ok(LookupOutcome::NotFound { status });
    }

    record_from_data(env.get("data").unwrap_or(&Json::Null)).map(LookupOutcome::Found)
}

fn record_from_data(data: &Json) -> std::result::Result<BanRecord, String> {
    // brak / null `data` → same wartości domyślne
    let empty = serde_json::Map::new();
    let obj = match data {
        Json::Object(m) => m,
        Json::Null => &empty,
        other => return Err(format!("`data` is not an object: {other}")),
    };

    let is_banned = match obj.get("is_banned") {
        None | Some(Json::Null) => false,
        Some(v) => flag(v).ok_or_else(|| format!("`is_banned` is not a flag: {v}"))?,
    };

    Ok(BanRecord {
        is_banned,
        nickname: text_or(obj.get("nickname"), ""),
        period: text_or(obj.get("period"), "0"),
        region: text_or(obj.get("region"), "N/A"),
    })
}

/// Liczba całkowita, także zapisana jako `200.0`.
fn whole(v: &Json) -> Option<i64> {
    let n = v.as_number()?;
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// 0/1 (też 1.0), true/false albo "0"/"1".
fn flag(v: &Json) -> Option<bool> {
    match v {
        Json::Bool(b) => Some(*b),
        Json::Number(_) => whole(v).map(|i| i != 0),
        Json::String(s) => s.trim().parse::<i64>().ok().map(|i| i != 0),
        _ => None,
    }
}

fn text_or(v: Option<&Json>, default: &str) -> String {
    match v {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Number(n)) => n.to_string(),
        Some(Json::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

/// UID: niepusty ciąg cyfr ASCII.
pub fn is_valid_uid(uid: &str) -> bool {
    !uid.is_empty() && uid.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(body: &str) -> BanRecord {
        match parse_body(body.as_bytes()) {
            Ok(LookupOutcome::Found(r)) => r,
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn parses_full_banned_payload() {
        let rec = found(
            r#"{"status":200,"data":{"is_banned":1,"nickname":"X","period":"7d","region":"EU"}}"#,
        );
        assert_eq!(
            rec,
            BanRecord {
                is_banned: true,
                nickname: "X".into(),
                period: "7d".into(),
                region: "EU".into(),
            }
        );
    }

    #[test]
    fn missing_fields_get_defaults() {
        let rec = found(r#"{"status":200,"data":{}}"#);
        assert!(!rec.is_banned);
        assert_eq!(rec.nickname, "");
        assert_eq!(rec.period, "0");
        assert_eq!(rec.region, "N/A");

        let rec = found(r#"{"status":200}"#);
        assert_eq!(rec.region, "N/A");
    }

    #[test]
    fn accepts_loose_field_types() {
        let rec = found(r#"{"status":200,"data":{"is_banned":true,"period":30,"nickname":12}}"#);
        assert!(rec.is_banned);
        assert_eq!(rec.period, "30");
        assert_eq!(rec.nickname, "12");

        let rec = found(r#"{"status":200,"data":{"is_banned":"0"}}"#);
        assert!(!rec.is_banned);
    }

    #[test]
    fn whole_number_floats_count_as_integers() {
        let rec = found(r#"{"status":200.0,"data":{"is_banned":1.0}}"#);
        assert!(rec.is_banned);

        let rec = found(r#"{"status":200,"data":{"is_banned":0.0}}"#);
        assert!(!rec.is_banned);

        assert!(matches!(
            parse_body(br#"{"status":200.5}"#),
            Ok(LookupOutcome::NotFound { status: None })
        ));
        assert!(parse_body(br#"{"status":200,"data":{"is_banned":0.5}}"#).is_err());
    }

    #[test]
    fn payload_status_other_than_200_is_not_found() {
        assert!(matches!(
            parse_body(br#"{"status":404,"data":null}"#),
            Ok(LookupOutcome::NotFound { status: Some(404) })
        ));
        assert!(matches!(
            parse_body(br#"{"data":{"is_banned":1}}"#),
            Ok(LookupOutcome::NotFound { status: None })
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(parse_body(b"<html>").is_err());
        assert!(parse_body(b"[200]").is_err());
        assert!(parse_body(br#"[200, {"is_banned":1,"nickname":"Z"}]"#).is_err());
        assert!(parse_body(b"200").is_err());
        assert!(parse_body(br#"{"status":200,"data":[1,2]}"#).is_err());
        assert!(parse_body(br#"{"status":200,"data":{"is_banned":"yes"}}"#).is_err());
    }

    #[test]
    fn endpoint_joins_base_and_uid() {
        let api = BanApi::new(Client::new(), "https://bans.example.com");
        assert_eq!(
            api.endpoint("123").unwrap().as_str(),
            "https://bans.example.com/check_ban/123"
        );

        let api = BanApi::new(Client::new(), "https://bans.example.com/api/");
        assert_eq!(
            api.endpoint("9").unwrap().as_str(),
            "https://bans.example.com/api/check_ban/9"
        );

        let api = BanApi::new(Client::new(), "not a url");
        assert!(api.endpoint("1").is_err());
    }

    #[test]
    fn uid_validation() {
        assert!(is_valid_uid("1234567890"));
        assert!(!is_valid_uid(""));
        assert!(!is_valid_uid("12a4"));
        assert!(!is_valid_uid("-12"));
        assert!(!is_valid_uid("١٢٣"));
    }
}

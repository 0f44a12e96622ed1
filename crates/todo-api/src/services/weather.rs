//! 날씨 조회.
//!
//! 외부 날씨 API(`[{"date": "MM-dd", "weather": "..."}]`)에서 오늘 날짜의
//! 날씨를 찾습니다. 할일 생성 시 한 번 호출되며 재시도하지 않습니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use todo_core::WeatherConfig;

use crate::error::{ServiceError, ServiceResult};

/// 날씨 제공자.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// 오늘 날씨.
    async fn today_weather(&self) -> ServiceResult<String>;
}

#[derive(Debug, Deserialize)]
struct WeatherEntry {
    date: String,
    weather: String,
}

/// HTTP 날씨 클라이언트.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Server(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// 주어진 날짜의 날씨.
    pub async fn weather_on(&self, date: NaiveDate) -> ServiceResult<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ServiceError::Server(format!("날씨 API 요청 실패: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Server(format!(
                "날씨 데이터를 가져오는데 실패했습니다. 상태 코드: {}",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Server(format!("날씨 응답 수신 실패: {e}")))?;

        // 빈 본문은 null과 같이 취급
        let entries: Option<Vec<WeatherEntry>> = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            serde_json::from_slice(&body)
                .map_err(|e| ServiceError::Server(format!("날씨 응답 파싱 실패: {e}")))?
        };

        let entries = match entries {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Err(ServiceError::Server("날씨 데이터가 없습니다.".to_string())),
        };

        let key = date.format("%m-%d").to_string();
        entries
            .into_iter()
            .find(|entry| entry.date == key)
            .map(|entry| entry.weather)
            .ok_or_else(|| {
                ServiceError::Server("오늘에 해당하는 날씨 데이터를 찾을 수 없습니다.".to_string())
            })
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn today_weather(&self) -> ServiceResult<String> {
        self.weather_on(Local::now().date_naive()).await
    }
}

/// 고정 값을 돌려주는 제공자 (테스트용).
#[derive(Debug, Clone)]
pub struct FixedWeather(pub String);

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn today_weather(&self) -> ServiceResult<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::Server) -> WeatherClient {
        WeatherClient::new(&WeatherConfig {
            url: format!("{}/weather.json", server.url()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_finds_entry_for_date() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/weather.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"date":"01-01","weather":"Sunny"},{"date":"03-15","weather":"Rainy"}]"#,
            )
            .create_async()
            .await;

        let weather = client(&server).weather_on(date(3, 15)).await.unwrap();
        assert_eq!(weather, "Rainy");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/weather.json")
            .with_status(503)
            .create_async()
            .await;

        let err = client(&server).weather_on(date(1, 1)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "날씨 데이터를 가져오는데 실패했습니다. 상태 코드: 503"
        );
    }

    #[tokio::test]
    async fn test_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/weather.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let err = client(&server).weather_on(date(1, 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "날씨 데이터가 없습니다.");
    }

    #[tokio::test]
    async fn test_null_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/weather.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("null")
            .create_async()
            .await;

        let err = client(&server).weather_on(date(1, 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "날씨 데이터가 없습니다.");
    }

    #[tokio::test]
    async fn test_blank_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/weather.json")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let err = client(&server).weather_on(date(1, 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "날씨 데이터가 없습니다.");
    }

    #[tokio::test]
    async fn test_no_entry_for_date() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/weather.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"date":"01-01","weather":"Sunny"}]"#)
            .create_async()
            .await;

        let err = client(&server).weather_on(date(12, 25)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Server(_)));
        assert_eq!(
            err.to_string(),
            "오늘에 해당하는 날씨 데이터를 찾을 수 없습니다."
        );
    }

    #[tokio::test]
    async fn test_fixed_weather() {
        let provider = FixedWeather("Cloudy".to_string());
        assert_eq!(provider.today_weather().await.unwrap(), "Cloudy");
    }
}

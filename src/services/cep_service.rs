// src/services/cep_service.rs
//
// Consulta de CEP no ViaCEP. Única dependência HTTP de saída do
// sistema; timeout global de 10s, sem retry (falha vira erro comum).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{common::error::AppError, domain::format::digits_only};

const DEFAULT_BASE_URL: &str = "https://viacep.com.br";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Resposta crua do ViaCEP. Em caso de CEP inexistente o serviço
/// responde 200 com `{"erro": true}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViaCepResponse {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    #[serde(default)]
    pub erro: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CepLookupResult {
    #[schema(example = "01310-100")]
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    #[schema(example = "Avenida Paulista, Bela Vista, São Paulo, SP")]
    pub address_string: String,
}

/// Junta logradouro, bairro, cidade e UF com vírgula, pulando campos
/// vazios (sem vírgula sobrando no começo ou no fim).
pub fn address_string(response: &ViaCepResponse) -> String {
    [
        response.logradouro.as_str(),
        response.bairro.as_str(),
        response.localidade.as_str(),
        response.uf.as_str(),
    ]
    .iter()
    .filter(|field| !field.trim().is_empty())
    .cloned()
    .collect::<Vec<_>>()
    .join(", ")
}

#[derive(Clone)]
pub struct CepService {
    client: reqwest::Client,
    base_url: String,
}

impl CepService {
    pub fn new(base_url: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    pub async fn lookup(&self, raw_cep: &str) -> Result<CepLookupResult, AppError> {
        let cep = digits_only(raw_cep);
        if cep.len() != 8 {
            return Err(AppError::InvalidCep);
        }

        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        let response: ViaCepResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.erro {
            return Err(AppError::CepNotFound);
        }

        let address = address_string(&response);
        Ok(CepLookupResult {
            cep: response.cep.clone(),
            logradouro: response.logradouro,
            complemento: response.complemento,
            bairro: response.bairro,
            localidade: response.localidade,
            uf: response.uf,
            address_string: address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_all_fields_with_commas() {
        let response = ViaCepResponse {
            logradouro: "Avenida Paulista".to_string(),
            bairro: "Bela Vista".to_string(),
            localidade: "São Paulo".to_string(),
            uf: "SP".to_string(),
            ..Default::default()
        };
        assert_eq!(
            address_string(&response),
            "Avenida Paulista, Bela Vista, São Paulo, SP"
        );
    }

    #[test]
    fn skips_empty_fields_without_dangling_commas() {
        let response = ViaCepResponse {
            logradouro: "".to_string(),
            bairro: "Centro".to_string(),
            localidade: "Campinas".to_string(),
            uf: "SP".to_string(),
            ..Default::default()
        };
        assert_eq!(address_string(&response), "Centro, Campinas, SP");

        let only_uf = ViaCepResponse {
            uf: "SP".to_string(),
            ..Default::default()
        };
        assert_eq!(address_string(&only_uf), "SP");

        let empty = ViaCepResponse::default();
        assert_eq!(address_string(&empty), "");
    }
}

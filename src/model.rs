use serde::Deserialize;

use crate::error::Result;
use crate::NatarisApi;

/// A model advertised by the service
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: String,
    /// Declared category, e.g. `text` or `audio`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize, Debug)]
struct ModelsResponse {
    data: Vec<ModelInfo>,
}

impl NatarisApi {
    /**
    Retrieves all models available to the authenticated account

    Fails with a decode error if the response lacks the `data` listing.
    */
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let res: ModelsResponse = self.get_json("/models").await?;
        Ok(res.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_decode_from_the_data_listing() {
        let res: ModelsResponse = serde_json::from_str(
            r#"{"data": [{"id": "qwen2.5-0.5b-instruct-q6_k", "type": "text"}]}"#,
        )
        .unwrap();
        assert_eq!(res.data.len(), 1);
        assert_eq!(res.data[0].kind, "text");
    }

    #[test]
    fn missing_data_key_does_not_decode() {
        assert!(serde_json::from_str::<ModelsResponse>(r#"{"models": []}"#).is_err());
    }
}

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::OptimizationResult;

const SYSTEM_PROMPT: &str = "You are an expert resume optimizer and career coach. \
Analyze the provided job description and resume, \
then optimize the resume to better match the job requirements.";

/// Client for the hosted chat-completions API. All optimization intelligence
/// lives on the model side; this type only formats the prompt and parses the
/// structured JSON reply.
pub struct ResumeOptimizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl ResumeOptimizer {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Whether the optimizer is usable; requires an upstream API key.
    pub fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub async fn optimize(
        &self,
        job_description: &str,
        resume: &str,
    ) -> AppResult<OptimizationResult> {
        if !self.is_available() {
            return Err(AppError::config("OPENAI_API_KEY is not set"));
        }

        info!(
            job_description_chars = job_description.chars().count(),
            resume_chars = resume.chars().count(),
            model = %self.model,
            "Requesting resume optimization"
        );

        let body = json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_user_prompt(job_description, resume) }
            ]
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::optimizer(format!("request to model API failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::optimizer(format!(
                "model API returned {status}: {detail}"
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| AppError::optimizer(format!("malformed completion payload: {e}")))?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| AppError::optimizer("model API returned no choices"))?;

        debug!(content_chars = content.chars().count(), "Parsing model reply");

        let result: OptimizationResult = serde_json::from_str(content)
            .map_err(|e| AppError::optimizer(format!("model returned malformed JSON: {e}")))?;

        info!(score = result.score, "Resume optimization completed");
        Ok(result)
    }
}

fn build_user_prompt(job_description: &str, resume: &str) -> String {
    format!(
        r#"Job Description:
{job_description}

Current Resume:
{resume}

Please:
1. Rewrite the resume to better align with the job description
2. Include relevant keywords from the job description naturally
3. Highlight transferable skills and experiences
4. Improve formatting and structure
5. Provide specific suggestions for improvement
6. Calculate a match score (0-100) based on how well the optimized resume aligns with the job
7. List the key keywords that match between the job description and resume

Focus on:
- Using action verbs and quantifiable achievements
- Matching the tone and language of the job description
- Emphasizing relevant skills and experiences
- Removing or de-emphasizing irrelevant information
- Ensuring ATS (Applicant Tracking System) compatibility

Respond with a JSON object containing the fields: "optimized_resume" (string),
"score" (integer 0-100), "keyword_matches" (array of strings),
"suggestions" (array of strings) and "analysis" (string)."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_both_inputs() {
        let prompt = build_user_prompt("Rust engineer, axum experience", "Jane Doe, 5 years Rust");
        assert!(prompt.contains("Rust engineer, axum experience"));
        assert!(prompt.contains("Jane Doe, 5 years Rust"));
        assert!(prompt.contains("match score (0-100)"));
    }

    #[test]
    fn completion_reply_parses_into_result() {
        let reply = r#"{
            "optimized_resume": "Jane Doe\nSenior Rust Engineer",
            "score": 82,
            "keyword_matches": ["rust", "axum"],
            "suggestions": ["Quantify achievements"],
            "analysis": "Strong overlap with the role."
        }"#;
        let result: OptimizationResult = serde_json::from_str(reply).unwrap();
        assert_eq!(result.score, 82);
        assert_eq!(result.keyword_matches, vec!["rust", "axum"]);
        assert_eq!(result.suggestions.len(), 1);
        assert!(result.optimized_resume.starts_with("Jane Doe"));
    }

    #[test]
    fn missing_list_fields_default_to_empty() {
        let reply = r#"{"optimized_resume": "text", "score": 40}"#;
        let result: OptimizationResult = serde_json::from_str(reply).unwrap();
        assert!(result.keyword_matches.is_empty());
        assert!(result.suggestions.is_empty());
        assert!(result.analysis.is_empty());
    }

    #[test]
    fn optimizer_without_key_is_unavailable() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            max_file_size_mb: 10,
            max_concurrent_requests: 10,
            request_timeout_seconds: 30,
            openai_api_key: String::new(),
            openai_model: "gpt-4o".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
        };
        let optimizer = ResumeOptimizer::new(&config).unwrap();
        assert!(!optimizer.is_available());
    }
}

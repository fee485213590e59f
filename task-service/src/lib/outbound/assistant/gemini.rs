use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::NaiveDateTime;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::config::AssistantConfig;
use crate::domain::task::models::ExtractedTask;
use crate::domain::task::models::Suggestion;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskPriority;
use crate::domain::task::ports::TaskAssistant;
use crate::task::errors::AssistantError;

const EXTRACTION_PROMPT: &str = "You are an expert productivity assistant. Extract structured \
task information from the user's request.

Analyze the text and extract:
- title: a concise task title (at most 50 characters)
- description: a detailed description (optional, may be null)
- due_date: date and time in ISO 8601 format (YYYY-MM-DDTHH:MM:SS), or null if no date is mentioned
- priority: \"low\", \"medium\", \"high\" or \"urgent\" depending on context

Rules for due_date:
- Today is {today}
- \"tomorrow\" = {tomorrow}
- \"the day after tomorrow\" = {day_after}
- \"next Monday/Tuesday/...\" = compute from the current day
- \"in 3 days\" = add days to the current date
- If no date is mentioned, use null

Rules for priority:
- \"urgent\", \"now\", \"immediately\" -> urgent
- \"important\" -> high
- default -> medium
- \"whenever\", \"no rush\" -> low

Respond ONLY with a valid JSON object (no markdown, no explanations):
{
  \"title\": \"...\",
  \"description\": \"...\" or null,
  \"due_date\": \"YYYY-MM-DDTHH:MM:SS\" or null,
  \"priority\": \"low|medium|high|urgent\"
}";

const SUGGEST_PROMPT: &str = "You are a productivity assistant. Analyze the user's tasks and \
suggest which one they should do now.

The user's tasks:
{tasks_json}

Current date and time: {now}

Consider:
1. Tasks with a due date coming up soon (urgent)
2. Tasks with high priority
3. Pending tasks versus tasks in progress

Respond ONLY with a JSON object:
{
  \"suggestion\": \"Friendly text explaining what to do and why\",
  \"task_id\": the suggested task's id (string) or null if there are no tasks
}";

/// Gemini-backed implementation of the task assistant.
///
/// Calls the `generateContent` endpoint in JSON mode and parses the model's
/// structured answer. Network or parse failures surface as `AssistantError`;
/// the domain service decides whether to fall back.
pub struct GeminiAssistant {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAssistant {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a prompt and return the model's raw text answer.
    async fn generate(&self, prompt: String) -> Result<String, AssistantError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::RequestFailed(format!(
                "Gemini returned status {}",
                status
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AssistantError::InvalidResponse("Empty candidate list".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ExtractedPayload {
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    priority: String,
}

#[derive(Debug, Deserialize)]
struct SuggestionPayload {
    suggestion: String,
    task_id: Option<String>,
}

/// Remove the markdown code fences models sometimes wrap JSON answers in.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Parse an ISO 8601 timestamp as produced by the model. An unparseable
/// value counts as "no date" rather than failing the whole extraction.
fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_extraction(text: &str) -> Result<ExtractedTask, AssistantError> {
    let payload: ExtractedPayload = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

    let priority: TaskPriority = payload
        .priority
        .parse()
        .map_err(AssistantError::InvalidResponse)?;

    Ok(ExtractedTask {
        title: payload.title,
        description: payload.description,
        due_date: payload.due_date.as_deref().and_then(parse_due_date),
        priority,
    })
}

fn parse_suggestion(text: &str) -> Result<Suggestion, AssistantError> {
    let payload: SuggestionPayload = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

    Ok(Suggestion {
        message: payload.suggestion,
        // An id the model invented maps to "no specific task"
        task_id: payload
            .task_id
            .as_deref()
            .and_then(|id| TaskId::from_string(id).ok()),
    })
}

fn extraction_prompt(now: DateTime<Utc>, input: &str) -> String {
    let prompt = EXTRACTION_PROMPT
        .replace("{today}", &now.format("%Y-%m-%d %H:%M:%S").to_string())
        .replace(
            "{tomorrow}",
            &(now + Duration::days(1)).format("%Y-%m-%d").to_string(),
        )
        .replace(
            "{day_after}",
            &(now + Duration::days(2)).format("%Y-%m-%d").to_string(),
        );

    format!("{}\n\nThe user's text: {}", prompt, input)
}

fn suggest_prompt(now: DateTime<Utc>, tasks: &[Task]) -> String {
    let tasks_json: Vec<_> = tasks
        .iter()
        .map(|t| {
            json!({
                "id": t.id.to_string(),
                "title": t.title.as_str(),
                "priority": t.priority.as_str(),
                "due_date": t.due_date.map(|d| d.to_rfc3339()),
                "status": t.status.as_str(),
            })
        })
        .collect();

    let prompt = SUGGEST_PROMPT
        .replace(
            "{tasks_json}",
            &serde_json::to_string_pretty(&tasks_json).unwrap_or_else(|_| "[]".to_string()),
        )
        .replace("{now}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    format!(
        "{}\n\nThe user's question: which task should I do now?",
        prompt
    )
}

#[async_trait]
impl TaskAssistant for GeminiAssistant {
    async fn extract_task(&self, input: &str) -> Result<ExtractedTask, AssistantError> {
        let answer = self.generate(extraction_prompt(Utc::now(), input)).await?;
        parse_extraction(&answer)
    }

    async fn suggest_next(&self, tasks: &[Task]) -> Result<Suggestion, AssistantError> {
        let answer = self.generate(suggest_prompt(Utc::now(), tasks)).await?;
        parse_suggestion(&answer)
    }
}

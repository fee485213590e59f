use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Suggestion;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::Title;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;
use crate::task::errors::TaskError;
use crate::task::ports::TaskAssistant;
use crate::task::ports::TaskRepository;
use crate::task::ports::TaskServicePort;

/// Domain service implementation for task operations.
pub struct TaskService<TR, TA>
where
    TR: TaskRepository,
    TA: TaskAssistant,
{
    repository: Arc<TR>,
    assistant: Arc<TA>,
}

impl<TR, TA> TaskService<TR, TA>
where
    TR: TaskRepository,
    TA: TaskAssistant,
{
    /// Create a new task service with injected dependencies.
    pub fn new(repository: Arc<TR>, assistant: Arc<TA>) -> Self {
        Self {
            repository,
            assistant,
        }
    }
}

/// Deterministic recommendation used when the assistant is unavailable:
/// the active task with the earliest due date, undated tasks last, ties
/// broken by priority rank.
fn fallback_suggestion(active: &[Task]) -> Suggestion {
    let pick = active
        .iter()
        .min_by_key(|t| (t.due_date.unwrap_or(DateTime::<Utc>::MAX_UTC), t.priority.rank()))
        .expect("fallback_suggestion requires at least one task");

    Suggestion {
        message: format!(
            "Consider completing '{}' (priority {})",
            pick.title,
            pick.priority.as_str()
        ),
        task_id: Some(pick.id),
    }
}

#[async_trait]
impl<TR, TA> TaskServicePort for TaskService<TR, TA>
where
    TR: TaskRepository,
    TA: TaskAssistant,
{
    async fn create_task(
        &self,
        user_id: UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError> {
        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            user_id,
            title: command.title,
            description: command.description,
            status: TaskStatus::Pending,
            priority: command.priority,
            due_date: command.due_date,
            original_input: None,
            created_by_ai: false,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        self.repository.create(task).await
    }

    async fn create_task_smart(&self, user_id: UserId, input: String) -> Result<Task, TaskError> {
        let extracted = self.assistant.extract_task(&input).await?;

        let title = Title::new(extracted.title)?;

        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            user_id,
            title,
            description: extracted.description,
            status: TaskStatus::Pending,
            priority: extracted.priority,
            due_date: extracted.due_date,
            original_input: Some(input),
            created_by_ai: true,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        self.repository.create(task).await
    }

    async fn list_tasks(
        &self,
        user_id: UserId,
        filter: TaskFilter,
    ) -> Result<Vec<Task>, TaskError> {
        self.repository.list(user_id, filter).await
    }

    async fn get_task(&self, user_id: UserId, task_id: &TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(user_id, task_id)
            .await?
            .ok_or(TaskError::NotFound(task_id.to_string()))
    }

    async fn update_task(
        &self,
        user_id: UserId,
        task_id: &TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        let mut task = self
            .repository
            .find_by_id(user_id, task_id)
            .await?
            .ok_or(TaskError::NotFound(task_id.to_string()))?;

        if let Some(title) = command.title {
            task.title = title;
        }
        if let Some(description) = command.description {
            task.description = Some(description);
        }
        if let Some(status) = command.status {
            task.status = status;
        }
        if let Some(priority) = command.priority {
            task.priority = priority;
        }
        if let Some(due_date) = command.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(completed_at) = command.completed_at {
            task.completed_at = Some(completed_at);
        }
        task.updated_at = Utc::now();

        self.repository.update(task).await
    }

    async fn delete_task(&self, user_id: UserId, task_id: &TaskId) -> Result<(), TaskError> {
        self.repository.delete(user_id, task_id).await
    }

    async fn complete_task(&self, user_id: UserId, task_id: &TaskId) -> Result<Task, TaskError> {
        let mut task = self
            .repository
            .find_by_id(user_id, task_id)
            .await?
            .ok_or(TaskError::NotFound(task_id.to_string()))?;

        if task.status == TaskStatus::Completed {
            return Err(TaskError::AlreadyCompleted(task_id.to_string()));
        }

        let now = Utc::now();
        task.status = TaskStatus::Completed;
        task.completed_at = Some(now);
        task.updated_at = now;

        self.repository.update(task).await
    }

    async fn suggest_next(&self, user_id: UserId) -> Result<Suggestion, TaskError> {
        let tasks = self.repository.list(user_id, TaskFilter::default()).await?;

        if tasks.is_empty() {
            return Ok(Suggestion {
                message: "You have no tasks. Nice work! Want to create one?".to_string(),
                task_id: None,
            });
        }

        let active: Vec<Task> = tasks.into_iter().filter(|t| t.status.is_active()).collect();

        if active.is_empty() {
            return Ok(Suggestion {
                message: "All of your tasks are completed!".to_string(),
                task_id: None,
            });
        }

        match self.assistant.suggest_next(&active).await {
            Ok(suggestion) => Ok(suggestion),
            Err(e) => {
                tracing::warn!(error = %e, "Assistant suggestion failed, using fallback");
                Ok(fallback_suggestion(&active))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::task::models::ExtractedTask;
    use crate::domain::task::models::TaskPriority;
    use crate::task::errors::AssistantError;

    mock! {
        pub TestTaskRepository {}

        #[async_trait]
        impl TaskRepository for TestTaskRepository {
            async fn create(&self, task: Task) -> Result<Task, TaskError>;
            async fn find_by_id(&self, user_id: UserId, task_id: &TaskId) -> Result<Option<Task>, TaskError>;
            async fn list(&self, user_id: UserId, filter: TaskFilter) -> Result<Vec<Task>, TaskError>;
            async fn update(&self, task: Task) -> Result<Task, TaskError>;
            async fn delete(&self, user_id: UserId, task_id: &TaskId) -> Result<(), TaskError>;
        }
    }

    mock! {
        pub TestTaskAssistant {}

        #[async_trait]
        impl TaskAssistant for TestTaskAssistant {
            async fn extract_task(&self, input: &str) -> Result<ExtractedTask, AssistantError>;
            async fn suggest_next(&self, tasks: &[Task]) -> Result<Suggestion, AssistantError>;
        }
    }

    fn task_for(user_id: UserId, title: &str) -> Task {
        let now = Utc::now();
        Task {
            id: TaskId::new(),
            user_id,
            title: Title::new(title.to_string()).unwrap(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
            original_input: None,
            created_by_ai: false,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_task_defaults() {
        let mut repository = MockTestTaskRepository::new();
        let assistant = MockTestTaskAssistant::new();
        let user_id = UserId::new();

        repository
            .expect_create()
            .withf(move |task| {
                task.user_id == user_id
                    && task.status == TaskStatus::Pending
                    && !task.created_by_ai
                    && task.original_input.is_none()
            })
            .times(1)
            .returning(Ok);

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let command = CreateTaskCommand {
            title: Title::new("Buy groceries".to_string()).unwrap(),
            description: None,
            priority: TaskPriority::Low,
            due_date: None,
        };

        let task = service.create_task(user_id, command).await.unwrap();
        assert_eq!(task.title.as_str(), "Buy groceries");
        assert_eq!(task.priority, TaskPriority::Low);
    }

    #[tokio::test]
    async fn test_create_task_smart_marks_ai_origin() {
        let mut repository = MockTestTaskRepository::new();
        let mut assistant = MockTestTaskAssistant::new();
        let user_id = UserId::new();
        let due = Utc::now() + Duration::days(1);

        assistant
            .expect_extract_task()
            .withf(|input| input.contains("dentist"))
            .times(1)
            .returning(move |_| {
                Ok(ExtractedTask {
                    title: "Call the dentist".to_string(),
                    description: None,
                    due_date: Some(due),
                    priority: TaskPriority::Urgent,
                })
            });

        repository
            .expect_create()
            .withf(|task| {
                task.created_by_ai
                    && task.original_input.as_deref()
                        == Some("Call the dentist tomorrow at 10am, it's urgent")
                    && task.status == TaskStatus::Pending
            })
            .times(1)
            .returning(Ok);

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let task = service
            .create_task_smart(
                user_id,
                "Call the dentist tomorrow at 10am, it's urgent".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(task.title.as_str(), "Call the dentist");
        assert_eq!(task.priority, TaskPriority::Urgent);
        assert_eq!(task.due_date, Some(due));
    }

    #[tokio::test]
    async fn test_create_task_smart_extraction_failure() {
        let repository = MockTestTaskRepository::new();
        let mut assistant = MockTestTaskAssistant::new();

        assistant.expect_extract_task().times(1).returning(|_| {
            Err(AssistantError::InvalidResponse(
                "not valid JSON".to_string(),
            ))
        });

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let result = service
            .create_task_smart(UserId::new(), "gibberish".to_string())
            .await;
        assert!(matches!(result.unwrap_err(), TaskError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_get_task_not_found() {
        let mut repository = MockTestTaskRepository::new();
        let assistant = MockTestTaskAssistant::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let result = service.get_task(UserId::new(), &TaskId::new()).await;
        assert!(matches!(result.unwrap_err(), TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_task_partial() {
        let mut repository = MockTestTaskRepository::new();
        let assistant = MockTestTaskAssistant::new();
        let user_id = UserId::new();

        let existing = task_for(user_id, "Old title");
        let task_id = existing.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));

        repository
            .expect_update()
            .withf(|task| {
                task.title.as_str() == "New title"
                    // Untouched fields keep their values
                    && task.priority == TaskPriority::Medium
                    && task.status == TaskStatus::Pending
            })
            .times(1)
            .returning(Ok);

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let command = UpdateTaskCommand {
            title: Some(Title::new("New title".to_string()).unwrap()),
            ..Default::default()
        };

        let task = service.update_task(user_id, &task_id, command).await.unwrap();
        assert_eq!(task.title.as_str(), "New title");
    }

    #[tokio::test]
    async fn test_complete_task_stamps_completion() {
        let mut repository = MockTestTaskRepository::new();
        let assistant = MockTestTaskAssistant::new();
        let user_id = UserId::new();

        let existing = task_for(user_id, "Ship the release");
        let task_id = existing.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));

        repository
            .expect_update()
            .withf(|task| task.status == TaskStatus::Completed && task.completed_at.is_some())
            .times(1)
            .returning(Ok);

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let task = service.complete_task(user_id, &task_id).await.unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_complete_task_already_completed() {
        let mut repository = MockTestTaskRepository::new();
        let assistant = MockTestTaskAssistant::new();
        let user_id = UserId::new();

        let mut existing = task_for(user_id, "Done already");
        existing.status = TaskStatus::Completed;
        existing.completed_at = Some(Utc::now());
        let task_id = existing.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let result = service.complete_task(user_id, &task_id).await;
        assert!(matches!(result.unwrap_err(), TaskError::AlreadyCompleted(_)));
    }

    #[tokio::test]
    async fn test_suggest_next_no_tasks() {
        let mut repository = MockTestTaskRepository::new();
        let assistant = MockTestTaskAssistant::new();

        repository.expect_list().times(1).returning(|_, _| Ok(vec![]));

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let suggestion = service.suggest_next(UserId::new()).await.unwrap();
        assert!(suggestion.task_id.is_none());
        assert!(suggestion.message.contains("no tasks"));
    }

    #[tokio::test]
    async fn test_suggest_next_all_completed() {
        let mut repository = MockTestTaskRepository::new();
        let assistant = MockTestTaskAssistant::new();
        let user_id = UserId::new();

        let mut done = task_for(user_id, "Finished");
        done.status = TaskStatus::Completed;

        repository
            .expect_list()
            .times(1)
            .returning(move |_, _| Ok(vec![done.clone()]));

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let suggestion = service.suggest_next(user_id).await.unwrap();
        assert!(suggestion.task_id.is_none());
        assert!(suggestion.message.contains("completed"));
    }

    #[tokio::test]
    async fn test_suggest_next_uses_assistant() {
        let mut repository = MockTestTaskRepository::new();
        let mut assistant = MockTestTaskAssistant::new();
        let user_id = UserId::new();

        let pending = task_for(user_id, "Write the report");
        let pending_id = pending.id;

        repository
            .expect_list()
            .times(1)
            .returning(move |_, _| Ok(vec![pending.clone()]));

        assistant.expect_suggest_next().times(1).returning(move |_| {
            Ok(Suggestion {
                message: "Start with the report; it is due soonest.".to_string(),
                task_id: Some(pending_id),
            })
        });

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let suggestion = service.suggest_next(user_id).await.unwrap();
        assert_eq!(suggestion.task_id, Some(pending_id));
    }

    #[tokio::test]
    async fn test_suggest_next_falls_back_on_assistant_error() {
        let mut repository = MockTestTaskRepository::new();
        let mut assistant = MockTestTaskAssistant::new();
        let user_id = UserId::new();

        // Urgent undated task vs medium task due tomorrow: the dated task wins
        let mut urgent = task_for(user_id, "Urgent but undated");
        urgent.priority = TaskPriority::Urgent;

        let mut dated = task_for(user_id, "Due tomorrow");
        dated.due_date = Some(Utc::now() + Duration::days(1));
        let dated_id = dated.id;

        repository
            .expect_list()
            .times(1)
            .returning(move |_, _| Ok(vec![urgent.clone(), dated.clone()]));

        assistant
            .expect_suggest_next()
            .times(1)
            .returning(|_| Err(AssistantError::RequestFailed("timeout".to_string())));

        let service = TaskService::new(Arc::new(repository), Arc::new(assistant));

        let suggestion = service.suggest_next(user_id).await.unwrap();
        assert_eq!(suggestion.task_id, Some(dated_id));
        assert!(suggestion.message.contains("Due tomorrow"));
    }
}

use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

use crate::messages::Task;
use crate::network::{ApiEvent, ApiRequest};

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(2000);

pub struct App {
    pub tasks: Vec<Task>,
    pub input: String,
    pub input_mode: InputMode,
    pub edit: EditState,
    pub list_state: ListState,
    pub notification: Option<Notification>,
    pub should_quit: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Composing,
}

/// At most one task is editable at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing { id: String, buffer: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub raised_at: Instant,
}

impl App {
    pub fn new() -> App {
        App {
            tasks: Vec::new(),
            input: String::new(),
            input_mode: InputMode::Normal,
            edit: EditState::Idle,
            list_state: ListState::default(),
            notification: None,
            should_quit: false,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notification = Some(Notification {
            level,
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| now.duration_since(n.raised_at) >= NOTIFICATION_TTL)
        {
            self.notification = None;
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.list_state.selected().and_then(|i| self.tasks.get(i))
    }

    pub fn select_next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let prev = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(prev));
    }

    fn clamp_selection(&mut self) {
        let selected = match (self.tasks.len(), self.list_state.selected()) {
            (0, _) => None,
            (len, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        self.list_state.select(selected);
    }

    /// Validates the new-task input. The input is only cleared once the
    /// server confirms the create.
    pub fn submit_new_task(&mut self) -> Option<ApiRequest> {
        if self.input.trim().is_empty() {
            self.notify(NotificationLevel::Warning, "Please enter a task!");
            return None;
        }
        Some(ApiRequest::Create {
            text: self.input.clone(),
        })
    }

    pub fn toggle_selected(&self) -> Option<ApiRequest> {
        self.selected_task().map(|task| ApiRequest::Toggle {
            id: task.id.clone(),
            completed: !task.completed,
        })
    }

    pub fn delete_selected(&self) -> Option<ApiRequest> {
        self.selected_task()
            .map(|task| ApiRequest::Delete { id: task.id.clone() })
    }

    /// Makes the selected task the edit target, discarding any other
    /// unsaved buffer.
    pub fn start_edit(&mut self) {
        if let Some(task) = self.selected_task() {
            self.edit = EditState::Editing {
                id: task.id.clone(),
                buffer: task.text.clone(),
            };
        }
    }

    pub fn save_edit(&mut self) -> Option<ApiRequest> {
        let EditState::Editing { id, buffer } = &self.edit else {
            return None;
        };
        if buffer.trim().is_empty() {
            self.notify(NotificationLevel::Warning, "Please enter text before saving!");
            return None;
        }
        Some(ApiRequest::Rename {
            id: id.clone(),
            text: buffer.clone(),
        })
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut String> {
        match &mut self.edit {
            EditState::Editing { buffer, .. } => Some(buffer),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self, id: &str) -> bool {
        matches!(&self.edit, EditState::Editing { id: target, .. } if target == id)
    }

    /// Moves the edit to the newly selected task. Staying on the same task
    /// keeps the buffer.
    fn follow_selection(&mut self) {
        let Some(selected) = self.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        if !self.is_editing(&selected) {
            self.start_edit();
        }
    }

    /// Applies one key press. Returns the request to send, if any.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<ApiRequest> {
        if matches!(self.edit, EditState::Editing { .. }) {
            return self.handle_edit_key(code);
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(code),
            InputMode::Composing => self.handle_composing_key(code),
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) -> Option<ApiRequest> {
        match code {
            KeyCode::Enter => return self.save_edit(),
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Up => {
                self.select_previous();
                self.follow_selection();
            }
            KeyCode::Down => {
                self.select_next();
                self.follow_selection();
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = self.edit_buffer_mut() {
                    buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.edit_buffer_mut() {
                    buffer.pop();
                }
            }
            _ => {}
        }
        None
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Option<ApiRequest> {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a' | 'i') => self.input_mode = InputMode::Composing,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char(' ') | KeyCode::Enter => return self.toggle_selected(),
            KeyCode::Char('e') => self.start_edit(),
            KeyCode::Char('d') | KeyCode::Delete => return self.delete_selected(),
            KeyCode::Esc => self.dismiss_notification(),
            _ => {}
        }
        None
    }

    fn handle_composing_key(&mut self, code: KeyCode) -> Option<ApiRequest> {
        match code {
            KeyCode::Enter => return self.submit_new_task(),
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            _ => {}
        }
        None
    }

    fn replace_task(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    /// Folds a server response into local state. Nothing changes
    /// optimistically: the list only moves on success.
    pub fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded(Ok(tasks)) => {
                self.tasks = tasks;
                self.clamp_selection();
            }
            ApiEvent::Loaded(Err(_)) => {
                self.notify(NotificationLevel::Error, "Failed to load tasks");
            }
            ApiEvent::Created(Ok(task)) => {
                self.tasks.push(task);
                self.input.clear();
                self.clamp_selection();
                self.notify(NotificationLevel::Success, "Task added successfully!");
            }
            ApiEvent::Created(Err(_)) => {
                self.notify(NotificationLevel::Error, "Failed to add task");
            }
            ApiEvent::Toggled(Ok(task)) => {
                self.replace_task(task);
                self.notify(NotificationLevel::Info, "Task status updated!");
            }
            ApiEvent::Toggled(Err(_)) => {
                self.notify(NotificationLevel::Error, "Failed to update status");
            }
            ApiEvent::Renamed { id, result: Ok(task) } => {
                self.replace_task(task);
                if self.is_editing(&id) {
                    self.edit = EditState::Idle;
                }
                self.notify(NotificationLevel::Success, "Task updated successfully!");
            }
            ApiEvent::Renamed { result: Err(_), .. } => {
                self.notify(NotificationLevel::Error, "Failed to update task");
            }
            ApiEvent::Deleted { id, result: Ok(()) } => {
                self.tasks.retain(|t| t.id != id);
                if self.is_editing(&id) {
                    self.edit = EditState::Idle;
                }
                self.clamp_selection();
                self.notify(NotificationLevel::Success, "Task deleted!");
            }
            ApiEvent::Deleted { result: Err(_), .. } => {
                self.notify(NotificationLevel::Error, "Failed to delete task");
            }
        }
    }
}

use crate::schema::notification::Notification;

// Title tokens the API emits in its localized notification titles.
pub(crate) const APPROVE_TOKENS: &[&str] = &["approv", "duyệt"];
pub(crate) const REJECT_TOKENS: &[&str] = &["reject", "từ chối"];
const ASSIGNMENT_TOKENS: &[&str] = &["phân công", "dự án", "assign", "project"];
const SUBMISSION_TOKENS: &[&str] = &["nộp bài", "yêu cầu", "submi", "request"];

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    ManagerOperations { task_id: Option<String> },
    ManagerWorkSchedule { attendance_id: String },
    UserEnvironment { assign_id: Option<String> },
    UserStatistics { task_id: String },
    UserHistory { attendance_id: Option<String> },
}

impl Destination {
    pub fn path(&self) -> String {
        match self {
            Destination::ManagerOperations { task_id: Some(id) } => {
                format!("/manager/operations?taskId={}", id)
            }
            Destination::ManagerOperations { task_id: None } => "/manager/operations".to_string(),
            Destination::ManagerWorkSchedule { attendance_id } => format!(
                "/manager/history?tab=work_schedule&attendanceId={}",
                attendance_id
            ),
            Destination::UserEnvironment { assign_id: Some(id) } => {
                format!("/user/environment?assignId={}", id)
            }
            Destination::UserEnvironment { assign_id: None } => "/user/environment".to_string(),
            Destination::UserStatistics { task_id } => {
                format!("/user/statistics?taskId={}", task_id)
            }
            Destination::UserHistory { attendance_id: Some(id) } => {
                format!("/user/history?attendanceId={}", id)
            }
            Destination::UserHistory { attendance_id: None } => "/user/history".to_string(),
        }
    }
}

impl Notification {
    /// Where a view should navigate when this notification is opened.
    pub fn destination(&self) -> Option<Destination> {
        let meta = &self.metadata;
        let title = self.title.to_lowercase();

        match self.effective_type() {
            "submission" => Some(Destination::ManagerOperations {
                task_id: meta.task_id.clone(),
            }),
            "assignment" => Some(Destination::UserEnvironment {
                assign_id: meta.assign_id.clone(),
            }),
            "task_status" => match &meta.task_id {
                Some(task_id) if contains_any(&title, APPROVE_TOKENS) => {
                    Some(Destination::UserStatistics {
                        task_id: task_id.clone(),
                    })
                }
                _ => Some(Destination::UserEnvironment {
                    assign_id: meta.assign_id.clone(),
                }),
            },
            "checkout_status" => Some(Destination::UserHistory {
                attendance_id: meta.attendance_id.clone(),
            }),
            "checkin" | "checkout_request" => Some(match &meta.attendance_id {
                Some(id) => Destination::ManagerWorkSchedule {
                    attendance_id: id.clone(),
                },
                None => Destination::ManagerOperations { task_id: None },
            }),
            _ => {
                if contains_any(&title, ASSIGNMENT_TOKENS) {
                    Some(Destination::UserEnvironment { assign_id: None })
                } else if contains_any(&title, SUBMISSION_TOKENS) {
                    Some(Destination::ManagerOperations { task_id: None })
                } else if contains_any(&title, APPROVE_TOKENS) || contains_any(&title, REJECT_TOKENS)
                {
                    Some(Destination::UserEnvironment { assign_id: None })
                } else {
                    None
                }
            }
        }
    }

    pub fn is_attendance(&self) -> bool {
        let title = self.title.to_lowercase();
        matches!(
            self.metadata.kind.as_deref(),
            Some("checkin" | "checkout_status" | "checkout_request")
        ) || title.contains("checkin")
            || title.contains("checkout")
    }

    pub fn is_task(&self) -> bool {
        let title = self.title.to_lowercase();
        matches!(
            self.metadata.kind.as_deref(),
            Some("task_status" | "submission")
        ) || title.contains("duyệt công việc")
            || title.contains("nộp bài mới")
            || title.contains("từ chối việc")
    }
}

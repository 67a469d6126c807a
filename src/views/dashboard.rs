use super::Notice;
use crate::{
    services::dashboard::{DashboardService, DashboardSummary},
    Result,
};

pub struct DashboardView {
    service: DashboardService,
    summary: Option<DashboardSummary>,
    notice: Option<Notice>,
}

impl DashboardView {
    pub fn new(service: DashboardService) -> Self {
        Self {
            service,
            summary: None,
            notice: None,
        }
    }

    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn refresh(&mut self) -> Result<&DashboardSummary> {
        match self.service.get_summary().await {
            Ok(summary) => Ok(self.summary.insert(summary)),
            Err(err) => {
                self.notice = Some(Notice::from(&err));
                Err(err)
            }
        }
    }
}

use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use keepsake_api_structs::update_special_date::{APIResponse, PathParams, RequestBody};
use keepsake_domain::{EventLabel, Permission, RecipientClass, SpecialDate, ID};
use keepsake_infra::KeepsakeContext;

pub async fn update_special_date_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateSpecialDateUseCase {
        special_date_id: path_params.special_date_id.clone(),
        event_label: body.event_label,
        custom_label: body.custom_label,
        event_date: body.event_date,
        is_recurring: body.is_recurring,
        send_reminder: body.send_reminder,
        reminder_recipients: body.reminder_recipients,
        reminder_hours_before: body.reminder_hours_before,
        notes: body.notes,
    };

    execute_with_permissions(usecase, &admin, &ctx)
        .await
        .map(|special_date| HttpResponse::Ok().json(APIResponse::new(special_date)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct UpdateSpecialDateUseCase {
    pub special_date_id: ID,
    pub event_label: Option<EventLabel>,
    pub custom_label: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub is_recurring: Option<bool>,
    pub send_reminder: Option<bool>,
    pub reminder_recipients: Option<Vec<RecipientClass>>,
    pub reminder_hours_before: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidSettings(String),
    StorageError,
}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(special_date_id) => Self::NotFound(format!(
                "The special date with id: {}, was not found.",
                special_date_id
            )),
            UseCaseError::InvalidSettings(reason) => Self::BadClientData(reason),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSpecialDateUseCase {
    type Response = SpecialDate;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSpecialDate";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        let mut special_date = ctx
            .repos
            .special_dates
            .find(&self.special_date_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.special_date_id.clone()))?;

        if let Some(event_label) = self.event_label {
            special_date.event_label = event_label;
            if event_label != EventLabel::Other {
                special_date.custom_label = None;
            }
        }
        if let Some(custom_label) = &self.custom_label {
            special_date.custom_label = Some(custom_label.clone());
        }
        if let Some(event_date) = self.event_date {
            special_date.event_date = event_date;
        }
        if let Some(is_recurring) = self.is_recurring {
            special_date.is_recurring = is_recurring;
        }
        if let Some(send_reminder) = self.send_reminder {
            special_date.send_reminder = send_reminder;
        }
        if let Some(reminder_recipients) = &self.reminder_recipients {
            special_date.reminder_recipients = reminder_recipients.clone();
        }
        if let Some(reminder_hours_before) = self.reminder_hours_before {
            special_date.reminder_hours_before = reminder_hours_before;
        }
        if let Some(notes) = &self.notes {
            special_date.notes = Some(notes.clone());
        }
        special_date
            .validate()
            .map_err(|e| UseCaseError::InvalidSettings(e.to_string()))?;
        special_date.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .special_dates
            .save(&special_date)
            .await
            .map(|_| special_date)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for UpdateSpecialDateUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::EditMembers]
    }
}

use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use keepsake_api_structs::create_special_date::{APIResponse, PathParams, RequestBody};
use keepsake_domain::{EventLabel, Permission, RecipientClass, SpecialDate, ID};
use keepsake_infra::KeepsakeContext;

pub async fn create_special_date_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateSpecialDateUseCase {
        member_id: path_params.member_id.clone(),
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
        .map(|special_date| HttpResponse::Created().json(APIResponse::new(special_date)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct CreateSpecialDateUseCase {
    pub member_id: ID,
    pub event_label: EventLabel,
    pub custom_label: Option<String>,
    pub event_date: NaiveDate,
    pub is_recurring: Option<bool>,
    pub send_reminder: Option<bool>,
    pub reminder_recipients: Option<Vec<RecipientClass>>,
    pub reminder_hours_before: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    MemberNotFound(ID),
    InvalidSettings(String),
    StorageError,
}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MemberNotFound(member_id) => Self::NotFound(format!(
                "The member with id: {}, was not found.",
                member_id
            )),
            UseCaseError::InvalidSettings(reason) => Self::BadClientData(reason),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSpecialDateUseCase {
    type Response = SpecialDate;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSpecialDate";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        let member = ctx
            .repos
            .members
            .find(&self.member_id)
            .await
            .ok_or_else(|| UseCaseError::MemberNotFound(self.member_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let special_date = SpecialDate {
            id: Default::default(),
            member_id: member.id,
            event_label: self.event_label,
            custom_label: self.custom_label.clone(),
            event_date: self.event_date,
            is_recurring: self.is_recurring.unwrap_or(true),
            send_reminder: self.send_reminder.unwrap_or(true),
            reminder_recipients: self.reminder_recipients.clone().unwrap_or_else(|| {
                vec![RecipientClass::Member, RecipientClass::WelfareOfficers]
            }),
            reminder_hours_before: self.reminder_hours_before.unwrap_or(24),
            notes: self.notes.clone(),
            is_active: true,
            created: now,
            updated: now,
        };
        special_date
            .validate()
            .map_err(|e| UseCaseError::InvalidSettings(e.to_string()))?;

        ctx.repos
            .special_dates
            .insert(&special_date)
            .await
            .map(|_| special_date)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateSpecialDateUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::EditMembers]
    }
}

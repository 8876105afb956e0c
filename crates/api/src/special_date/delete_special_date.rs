use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::delete_special_date::{APIResponse, PathParams};
use keepsake_domain::{Permission, SpecialDate, ID};
use keepsake_infra::KeepsakeContext;

pub async fn delete_special_date_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let usecase = DeleteSpecialDateUseCase {
        special_date_id: path_params.special_date_id.clone(),
    };

    execute_with_permissions(usecase, &admin, &ctx)
        .await
        .map(|special_date| HttpResponse::Ok().json(APIResponse::new(special_date)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct DeleteSpecialDateUseCase {
    pub special_date_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(special_date_id) => Self::NotFound(format!(
                "The special date with id: {}, was not found.",
                special_date_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteSpecialDateUseCase {
    type Response = SpecialDate;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSpecialDate";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        let mut special_date = ctx
            .repos
            .special_dates
            .find(&self.special_date_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.special_date_id.clone()))?;

        // Retire instead of erasing so the delivery history keeps its reference
        special_date.is_active = false;
        special_date.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .special_dates
            .save(&special_date)
            .await
            .map(|_| special_date)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for DeleteSpecialDateUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::EditMembers]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::NaiveDate;
    use keepsake_domain::{EventLabel, Member, RecipientClass};

    #[actix_web::main]
    #[test]
    async fn retires_the_record() {
        let ctx = KeepsakeContext::create_inmemory();

        let member = Member::new("Amina Bello", "amina@psn.org", 0);
        ctx.repos
            .members
            .insert(&member)
            .await
            .expect("To insert member");
        let special_date = SpecialDate {
            id: Default::default(),
            member_id: member.id.clone(),
            event_label: EventLabel::Birthday,
            custom_label: None,
            event_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            is_recurring: true,
            send_reminder: true,
            reminder_recipients: vec![RecipientClass::Member],
            reminder_hours_before: 24,
            notes: None,
            is_active: true,
            created: 0,
            updated: 0,
        };
        ctx.repos
            .special_dates
            .insert(&special_date)
            .await
            .expect("To insert special date");

        let usecase = DeleteSpecialDateUseCase {
            special_date_id: special_date.id.clone(),
        };
        let deleted = execute(usecase, &ctx).await.expect("To delete special date");
        assert!(!deleted.is_active);

        // still on record, just no longer active
        let stored = ctx
            .repos
            .special_dates
            .find(&special_date.id)
            .await
            .unwrap();
        assert!(!stored.is_active);
    }

    #[actix_web::main]
    #[test]
    async fn unknown_special_date_is_not_found() {
        let ctx = KeepsakeContext::create_inmemory();

        let usecase = DeleteSpecialDateUseCase {
            special_date_id: Default::default(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}

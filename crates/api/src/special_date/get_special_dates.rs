use crate::{
    error::KeepsakeError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute_with_permissions, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use keepsake_api_structs::get_member_special_dates::{APIResponse, PathParams};
use keepsake_domain::{Permission, SpecialDate, ID};
use keepsake_infra::KeepsakeContext;

pub async fn get_special_dates_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<KeepsakeContext>,
) -> Result<HttpResponse, KeepsakeError> {
    let admin = protect_admin_route(&http_req, &ctx).await?;

    let usecase = GetSpecialDatesUseCase {
        member_id: path_params.member_id.clone(),
    };

    execute_with_permissions(usecase, &admin, &ctx)
        .await
        .map(|special_dates| HttpResponse::Ok().json(APIResponse::new(special_dates)))
        .map_err(KeepsakeError::from)
}

#[derive(Debug)]
pub struct GetSpecialDatesUseCase {
    pub member_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    MemberNotFound(ID),
}

impl From<UseCaseError> for KeepsakeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MemberNotFound(member_id) => Self::NotFound(format!(
                "The member with id: {}, was not found.",
                member_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSpecialDatesUseCase {
    type Response = Vec<SpecialDate>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSpecialDates";

    async fn execute(&mut self, ctx: &KeepsakeContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.members.find(&self.member_id).await.is_none() {
            return Err(UseCaseError::MemberNotFound(self.member_id.clone()));
        }

        let special_dates = ctx
            .repos
            .special_dates
            .find_by_member(&self.member_id)
            .await
            .into_iter()
            .filter(|special_date| special_date.is_active)
            .collect();
        Ok(special_dates)
    }
}

impl PermissionBoundary for GetSpecialDatesUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ViewMembers]
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
    async fn lists_only_active_special_dates() {
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
        let mut retired = special_date.clone();
        retired.id = Default::default();
        retired.is_active = false;
        for record in [&special_date, &retired] {
            ctx.repos
                .special_dates
                .insert(record)
                .await
                .expect("To insert special date");
        }

        let usecase = GetSpecialDatesUseCase {
            member_id: member.id.clone(),
        };
        let listed = execute(usecase, &ctx).await.expect("To list special dates");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, special_date.id);
    }

    #[actix_web::main]
    #[test]
    async fn unknown_member_is_not_found() {
        let ctx = KeepsakeContext::create_inmemory();

        let usecase = GetSpecialDatesUseCase {
            member_id: Default::default(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::MemberNotFound(_))
        ));
    }
}

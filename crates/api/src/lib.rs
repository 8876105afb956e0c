mod admin;
mod error;
mod job_schedulers;
mod member;
mod reminder;
mod shared;
mod special_date;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::{start_retry_failed_reminders_job, start_send_reminders_job, PipelineGate};
use keepsake_infra::KeepsakeContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    admin::configure_routes(cfg);
    member::configure_routes(cfg);
    reminder::configure_routes(cfg);
    special_date::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: KeepsakeContext) -> Result<Self, std::io::Error> {
        let gate = PipelineGate::new();
        let (server, port) = Application::configure_server(context.clone(), gate.clone()).await?;
        Application::start_job_schedulers(context, gate);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: KeepsakeContext, gate: PipelineGate) {
        start_send_reminders_job(context.clone(), gate.clone());
        start_retry_failed_reminders_job(context, gate);
    }

    async fn configure_server(
        context: KeepsakeContext,
        gate: PipelineGate,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr().unwrap().port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();
            let gate = gate.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(web::Data::new(gate))
                .service(web::scope("/api/v1").configure(|cfg| configure_server_api(cfg)))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

use chrono::NaiveTime;
use chrono_tz::Tz;
use keepsake_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code used to create new `Admin`s
    pub create_admin_secret_code: String,
    /// Port for the application to run on
    pub port: usize,
    /// Wall-clock time of day at which the daily reminder run starts
    pub reminder_time: NaiveTime,
    /// Timezone in which occurrences and calendar days are evaluated
    pub timezone: Tz,
    /// SMTP transport settings. When absent the mailer is left unconfigured
    /// and every delivery attempt is recorded as failed.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

const DEFAULT_SMTP_PORT: u16 = 587;

impl SmtpConfig {
    fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST");
        let username = std::env::var("SMTP_USERNAME");
        let password = std::env::var("SMTP_PASSWORD");
        let (host, username, password) = match (host, username, password) {
            (Ok(host), Ok(username), Ok(password)) => (host, username, password),
            _ => {
                info!("SMTP_HOST, SMTP_USERNAME and SMTP_PASSWORD environment variables are not all set. Reminder emails will not be delivered.");
                return None;
            }
        };
        let port = match std::env::var("SMTP_PORT") {
            Ok(port) => match port.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given SMTP_PORT: {} is not valid, falling back to the default port: {}.",
                        port, DEFAULT_SMTP_PORT
                    );
                    DEFAULT_SMTP_PORT
                }
            },
            Err(_) => DEFAULT_SMTP_PORT,
        };
        let from = std::env::var("EMAIL_FROM").unwrap_or_else(|_| username.clone());
        Some(Self {
            host,
            port,
            username,
            password,
            from,
        })
    }
}

impl Config {
    pub fn new() -> Self {
        let create_admin_secret_code = match std::env::var("CREATE_ADMIN_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find CREATE_ADMIN_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for creating admins was generated and set to: {}",
                    code
                );
                code
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let default_reminder_time = "08:00";
        let reminder_time = std::env::var("REMINDER_TIME").unwrap_or(default_reminder_time.into());
        let reminder_time = match NaiveTime::parse_from_str(&reminder_time, "%H:%M") {
            Ok(time) => time,
            Err(_) => {
                warn!(
                    "The given REMINDER_TIME: {} is not a valid HH:MM time, falling back to the default: {}.",
                    reminder_time, default_reminder_time
                );
                NaiveTime::parse_from_str(default_reminder_time, "%H:%M").unwrap()
            }
        };
        let timezone = std::env::var("REMINDER_TIMEZONE").unwrap_or_else(|_| "UTC".into());
        let timezone = match timezone.parse::<Tz>() {
            Ok(timezone) => timezone,
            Err(_) => {
                warn!(
                    "The given REMINDER_TIMEZONE: {} is not a valid IANA timezone name, falling back to UTC.",
                    timezone
                );
                chrono_tz::UTC
            }
        };
        Self {
            create_admin_secret_code,
            port,
            reminder_time,
            timezone,
            smtp: SmtpConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn it_falls_back_to_defaults() {
        std::env::remove_var("PORT");
        std::env::remove_var("REMINDER_TIME");
        std::env::remove_var("REMINDER_TIMEZONE");
        std::env::remove_var("SMTP_HOST");
        std::env::remove_var("SMTP_USERNAME");
        std::env::remove_var("SMTP_PASSWORD");

        let config = Config::new();
        assert_eq!(config.port, 5000);
        assert_eq!(
            config.reminder_time,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert!(config.smtp.is_none());
    }

    #[test]
    #[serial]
    fn it_reads_reminder_schedule_from_env() {
        std::env::set_var("REMINDER_TIME", "17:30");
        std::env::set_var("REMINDER_TIMEZONE", "Africa/Lagos");

        let config = Config::new();
        assert_eq!(
            config.reminder_time,
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );
        assert_eq!(config.timezone, chrono_tz::Africa::Lagos);

        std::env::remove_var("REMINDER_TIME");
        std::env::remove_var("REMINDER_TIMEZONE");
    }

    #[test]
    #[serial]
    fn it_rejects_invalid_schedule_values() {
        std::env::set_var("REMINDER_TIME", "8 am");
        std::env::set_var("REMINDER_TIMEZONE", "Mars/Olympus");

        let config = Config::new();
        assert_eq!(
            config.reminder_time,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(config.timezone, chrono_tz::UTC);

        std::env::remove_var("REMINDER_TIME");
        std::env::remove_var("REMINDER_TIMEZONE");
    }

    #[test]
    #[serial]
    fn smtp_settings_require_credentials() {
        std::env::set_var("SMTP_HOST", "smtp.example.com");
        std::env::remove_var("SMTP_USERNAME");
        std::env::remove_var("SMTP_PASSWORD");
        std::env::remove_var("EMAIL_FROM");
        assert!(Config::new().smtp.is_none());

        std::env::set_var("SMTP_USERNAME", "reminders@example.com");
        std::env::set_var("SMTP_PASSWORD", "hunter2");
        let smtp = Config::new().smtp.expect("smtp config");
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, DEFAULT_SMTP_PORT);
        assert_eq!(smtp.from, "reminders@example.com");

        std::env::set_var("EMAIL_FROM", "no-reply@example.com");
        let smtp = Config::new().smtp.expect("smtp config");
        assert_eq!(smtp.from, "no-reply@example.com");

        std::env::remove_var("SMTP_HOST");
        std::env::remove_var("SMTP_USERNAME");
        std::env::remove_var("SMTP_PASSWORD");
        std::env::remove_var("EMAIL_FROM");
    }
}

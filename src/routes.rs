use crate::{
    api::{vacation, weather},
    config::Config,
    error,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{Responder, get, web};
use anyhow::{Context, Result};

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer-IP limiter allowing `requests_per_min` with an equal burst.
pub fn build_limiter(requests_per_min: u32) -> Result<LimiterConfig> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limiter settings")
}

#[get("/")]
async fn index() -> impl Responder {
    "Vacation API is running"
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &LimiterConfig) {
    error::configure_extractors(cfg);

    // liveness, outside the rate-limited scope
    cfg.service(index);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter)) // rate limiting
            // /weather?userId=&cityId=
            .service(web::resource("/weather").route(web::get().to(weather::get_weather)))
            // /requests
            .service(web::resource("/requests").route(web::post().to(vacation::create_request)))
            // /balance/{user_id}
            .service(
                web::resource("/balance/{user_id}")
                    .name(vacation::BALANCE_ROUTE)
                    .route(web::get().to(vacation::get_balance)),
            ),
    );
}

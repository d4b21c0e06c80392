use crate::{api::attendance, config::Config};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/attendance")
                // /attendance
                .service(
                    web::resource("")
                        .route(web::post().to(attendance::add_record))
                        .route(web::get().to(attendance::list_records)),
                )
                // /attendance/save
                .service(web::resource("/save").route(web::post().to(attendance::save_records)))
                // /attendance/load
                .service(web::resource("/load").route(web::post().to(attendance::load_records)))
                // /attendance/{employee_id}
                .service(
                    web::resource("/{employee_id}").route(web::put().to(attendance::update_status)),
                ),
        ),
    );
}

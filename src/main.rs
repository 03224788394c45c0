use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use forever_backend::{
    config::Config,
    database::{connect, ensure_indexes},
    external::{CloudinaryService, RazorpayService, StripeService},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 连接文档数据库
    let db = connect(&config.database)
        .await
        .expect("Failed to connect to MongoDB");

    // 创建唯一索引
    ensure_indexes(&db)
        .await
        .expect("Failed to create database indexes");

    // 创建JWT服务
    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.expires_in);

    // 创建外部服务
    let stripe_service = StripeService::new(config.stripe.clone());
    let razorpay_service = RazorpayService::new(config.razorpay.clone());
    let cloudinary_service = CloudinaryService::new(config.cloudinary.clone());

    // 创建服务
    let auth_service = AuthService::new(&db, jwt_service.clone(), config.admin.clone());
    let user_service = UserService::new(&db, cloudinary_service);
    let cart_service = CartService::new(&db);
    let order_service = OrderService::new(&db, stripe_service, razorpay_service);
    let subcategory_service = SubCategoryService::new(&db);
    let review_service = ReviewService::new(&db);
    let analytics_service = AnalyticsService::new(&db);

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(cart_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(subcategory_service.clone()))
            .app_data(web::Data::new(review_service.clone()))
            .app_data(web::Data::new(analytics_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api")
                    .configure(handlers::user_config)
                    .configure(handlers::cart_config)
                    .configure(handlers::order_config)
                    .configure(handlers::subcategory_config)
                    .configure(handlers::review_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}

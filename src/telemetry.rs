use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{trace as sdktrace, Resource};
use opentelemetry_semantic_conventions::resource;
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Wires up tracing for the whole process: env-filtered fmt output (text or
/// JSON via RUST_LOG_FORMAT) and, when OTEL_EXPORTER_OTLP_ENDPOINT is set, an
/// OTLP span exporter.
pub fn init_telemetry(service_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(
        // sqlx/sea_orm statement logging is noise at info level
        |_| "info,petharbor_server=info,sqlx=warn,sea_orm=warn".into(),
    ));

    let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .map(|endpoint| otlp_layer(service_name, &endpoint));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer);

    let json_logs = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v == "json");
    if json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .without_time(),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn otlp_layer<S>(service_name: &str, endpoint: &str) -> OpenTelemetryLayer<S, sdktrace::Tracer>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let resource = Resource::new(vec![KeyValue::new(
        resource::SERVICE_NAME,
        service_name.to_string(),
    )]);

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(
            sdktrace::config()
                .with_resource(resource)
                .with_sampler(sdktrace::Sampler::AlwaysOn),
        )
        .install_batch(opentelemetry_sdk::runtime::Tokio)
        .expect("failed to install OpenTelemetry tracer");

    tracing_opentelemetry::layer().with_tracer(tracer)
}

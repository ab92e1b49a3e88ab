use hexdiff::Application;

fn main() {
    let telemetry = hexdiff_common::init_tracing("warn");
    let code = Application::new().run();
    // flush buffered log lines; process::exit skips destructors
    drop(telemetry);
    std::process::exit(code);
}

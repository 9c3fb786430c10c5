// SPDX-License-Identifier: MPL-2.0
use vitrine::app::{self, Flags};

fn main() -> iced::Result {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap_or(None),
        variant: args.opt_value_from_str("--variant").unwrap_or(None),
        window_width: args.opt_value_from_str("--width").unwrap_or(None),
        data_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    app::run(flags)
}

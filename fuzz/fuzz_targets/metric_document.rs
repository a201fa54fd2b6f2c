#![no_main]

use capaz::config::SpcConfig;
use capaz::report::analyze_metrics;
use capaz::series::MetricSet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any document that passes validation must analyze without panicking
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(set) = MetricSet::from_json_str(input) {
            let reports = analyze_metrics(&set.metrics, &SpcConfig::default());
            for report in &reports {
                let _ = report.to_report_string();
            }
        }
    }
});

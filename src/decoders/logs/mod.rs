//! Structured application/infrastructure log decoders: one event per
//! record, timestamp into `started_at`, level into `severity`/`status`,
//! identity fields into `principal`/`origin`/`target`.

pub mod apache_access;
pub mod auditd;
pub mod aws_cloudtrail;
pub mod azure_activity;
pub mod bunyan;
pub mod cisco_asa;
pub mod gcp_cloud_logging;
pub mod iptables;
pub mod kubernetes;
pub mod log4j;
pub mod logrus;
pub mod nginx_access;
pub mod nlog;
pub mod pf_firewall;
pub mod pino;
pub mod python_logging;
pub mod rails_log;
pub mod ruby_logger;
pub mod s3_access;
pub mod serilog;
pub mod syslog;
pub mod vpc_flow;
pub mod winston;
pub mod windows_event;

use crate::registry::Registry;

pub fn register_all(registry: &mut Registry) {
    registry.register(syslog::Syslog);
    registry.register(apache_access::ApacheAccess);
    registry.register(nginx_access::NginxAccess);
    registry.register(python_logging::PythonLogging);
    registry.register(log4j::Log4j);
    registry.register(winston::Winston);
    registry.register(pino::Pino);
    registry.register(bunyan::Bunyan);
    registry.register(serilog::Serilog);
    registry.register(nlog::Nlog);
    registry.register(logrus::Logrus);
    registry.register(aws_cloudtrail::AwsCloudtrail);
    registry.register(gcp_cloud_logging::GcpCloudLogging);
    registry.register(azure_activity::AzureActivity);
    registry.register(iptables::Iptables);
    registry.register(pf_firewall::PfFirewall);
    registry.register(cisco_asa::CiscoAsa);
    registry.register(vpc_flow::VpcFlow);
    registry.register(kubernetes::Kubernetes);
    registry.register(windows_event::WindowsEvent);
    registry.register(auditd::Auditd);
    registry.register(s3_access::S3Access);
    registry.register(ruby_logger::RubyLogger);
    registry.register(rails_log::RailsLog);
}

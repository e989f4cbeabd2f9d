mod campaign_tests;
mod customer_tests;
mod gateway_tests;
mod health_tests;
mod notification_tests;
mod report_tests;
mod sales_tests;
mod schedule_tests;
mod support_tests;
mod user_tests;

//! AWS implementations of the deploygate queue and status store seams.
//!
//! SQS carries the dispatch queue ([`queue::SqsQueue`]) and DynamoDB
//! holds the status table ([`store::DynamoStatusStore`]).  Both clients
//! are built from one shared [`aws_config::SdkConfig`] (see [`aws`]).

pub mod aws;
pub mod queue;
pub mod store;

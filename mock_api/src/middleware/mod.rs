pub mod outage_middleware;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Upstream {
    #[prost(oneof = "UpstreamContent", tags = "1")]
    pub content: Option<UpstreamContent>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ping {
    #[prost(string, optional, tag = "1")]
    pub echo: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Downstream {
    #[prost(oneof = "DownstreamContent", tags = "1, 2, 3")]
    pub content: Option<DownstreamContent>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pong {
    #[prost(string, optional, tag = "1")]
    pub echo: Option<String>,
}

/// One tick worth of instrument readings for the dashboard.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Sample {
    #[prost(int64, tag = "1")]
    pub timestamp: i64,
    #[prost(uint32, tag = "2")]
    pub attempt: u32,
    #[prost(string, tag = "3")]
    pub phase: String,
    #[prost(float, tag = "4")]
    pub indicated_mph: f32,
    #[prost(float, tag = "5")]
    pub altitude_agl: f32,
    #[prost(float, tag = "6")]
    pub pitch: f32,
    #[prost(float, tag = "7")]
    pub roll: f32,
}

/// Sent when the simulator has been reset and a new takeoff starts, dashboards drop their history.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AttemptStarted {
    #[prost(int64, tag = "1")]
    pub timestamp: i64,
    #[prost(uint32, tag = "2")]
    pub attempt: u32,
    #[prost(string, tag = "3")]
    pub profile: String,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum DownstreamContent {
    #[prost(message, tag = "1")]
    Pong(Pong),
    #[prost(message, tag = "2")]
    Sample(Sample),
    #[prost(message, tag = "3")]
    AttemptStarted(AttemptStarted),
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum UpstreamContent {
    #[prost(message, tag = "1")]
    Ping(Ping),
}

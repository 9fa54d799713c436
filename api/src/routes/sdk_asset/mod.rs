pub mod sdk_asset_route;

use geography_types::geo::impls::GeoPoint2d;
use geography_types::geo::{GeoPoint, NewGeoPoint};
use geography_types::impls::{ClosedContour, Contour, Polygon};

use crate::config::{FactoryConfig, ResolvedConfig};
use crate::error::{GeographyError, Result};
use crate::feature::{LineStringFeature, PointFeature, PolygonFeature};
use crate::srid::SpatialReferenceId;
use crate::strategy::{strip_closing_point, CoordinateStrategy, Strategy, StrategyKind};

/// Constructs geographic features bound to one computation model.
///
/// The factory validates coordinates of every feature it creates with its [`Strategy`], and all measurements of the
/// created features are delegated to that strategy. A factory is immutable, so it can be shared between threads
/// freely. Usually factories are obtained from a [`FactoryRegistry`](crate::FactoryRegistry) rather than created
/// directly.
#[derive(Debug)]
pub struct GeographyFactory {
    strategy: Strategy,
    srid: SpatialReferenceId,
}

impl GeographyFactory {
    /// Creates a new factory of the given kind. Fails with [`GeographyError::InvalidConfig`] if the configuration
    /// is not valid for this kind of factory.
    pub fn new(kind: StrategyKind, config: &FactoryConfig) -> Result<Self> {
        Ok(Self::with_resolved_config(kind, &config.resolve(kind)?))
    }

    /// Creates a new factory from an already validated configuration.
    pub fn with_resolved_config(kind: StrategyKind, config: &ResolvedConfig) -> Self {
        Self {
            strategy: Strategy::new(kind, config),
            srid: SpatialReferenceId::EPSG_4326,
        }
    }

    /// Kind of the computation model.
    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Spatial reference reported by the features of this factory. Always EPSG:4326.
    pub fn spatial_reference_id(&self) -> SpatialReferenceId {
        self.srid
    }

    /// Computation model the factory is bound to.
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Number of segments used to approximate a quarter of a circle in buffers.
    pub fn buffer_resolution(&self) -> u32 {
        self.strategy.buffer_resolution()
    }

    /// Creates a point from latitude and longitude in degrees.
    pub fn create_point(&self, lat: f64, lon: f64) -> Result<PointFeature<'_>> {
        let point = GeoPoint2d::latlon(lat, lon);
        self.strategy.validate_point(&point)?;

        Ok(PointFeature::new(self, point))
    }

    /// Creates an open line string. At least two points are required.
    pub fn create_line_string<P>(&self, points: &[P]) -> Result<LineStringFeature<'_>>
    where
        P: GeoPoint<Num = f64>,
    {
        if points.len() < 2 {
            return Err(GeographyError::InvalidGeometry(format!(
                "line string must have at least 2 points, got {}",
                points.len()
            )));
        }

        let points = self.convert_points(points)?;
        Ok(LineStringFeature::new(self, Contour::open(points)))
    }

    /// Creates a closed line string that is a valid polygon boundary. The closing point may be omitted.
    pub fn create_linear_ring<P>(&self, points: &[P]) -> Result<LineStringFeature<'_>>
    where
        P: GeoPoint<Num = f64>,
    {
        let ring = self.ring(points)?;
        Ok(LineStringFeature::new(self, ring.into()))
    }

    /// Creates a polygon. The first ring is the outer boundary, the others are holes. Closing points of the rings
    /// may be omitted.
    pub fn create_polygon<P, R>(&self, rings: &[R]) -> Result<PolygonFeature<'_>>
    where
        P: GeoPoint<Num = f64>,
        R: AsRef<[P]>,
    {
        let rings = rings
            .iter()
            .map(|ring| self.ring(ring.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(PolygonFeature::new(self, Polygon::from_rings(rings)?))
    }

    /// Wraps a ring produced by the strategy into a polygon, validating it the same way as user input.
    pub(crate) fn polygon_from_ring(
        &self,
        ring: ClosedContour<GeoPoint2d>,
    ) -> Result<PolygonFeature<'_>> {
        self.strategy.validate_ring(&ring)?;
        Ok(PolygonFeature::new(self, Polygon::from(ring)))
    }

    fn ring<P: GeoPoint<Num = f64>>(&self, points: &[P]) -> Result<ClosedContour<GeoPoint2d>> {
        let points = self.convert_points(points)?;
        let ring = ClosedContour::new(strip_closing_point(&points).to_vec());
        self.strategy.validate_ring(&ring)?;

        Ok(ring)
    }

    fn convert_points<P: GeoPoint<Num = f64>>(&self, points: &[P]) -> Result<Vec<GeoPoint2d>> {
        points
            .iter()
            .map(|p| {
                let point = GeoPoint2d::from(p);
                self.strategy.validate_point(&point)?;
                Ok(point)
            })
            .collect()
    }
}
